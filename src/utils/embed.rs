use serenity::builder::CreateEmbed;

pub fn error(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("Something went wrong")
        .description(message)
        .color(0xED4245)
}

pub fn notice(title: &str, message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(message)
        .color(0x5865F2)
}
