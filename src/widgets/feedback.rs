pub const COUNTER_NEUTRAL_COLOR: &str = "var(--primary-color)";

/// Message and display colour for the counter game.
pub fn counter_feedback(count: i64) -> (&'static str, &'static str) {
    match count {
        0 => ("", COUNTER_NEUTRAL_COLOR),
        10.. => ("🔥 You're on fire!", "green"),
        1.. => ("📈 Going up!", "green"),
        ..=-10 => ("❄️ Chill out!", "red"),
        _ => ("📉 Going down!", "red"),
    }
}

pub fn greet_user(username: &str) -> String {
    format!("Hello, {username}! Welcome to JavaScript.")
}

pub fn click_message(clicks: u64) -> String {
    format!("🎉 Button clicked {clicks} time(s)! Great job!")
}

pub fn age_message(age: u32) -> &'static str {
    if age >= 18 {
        "You are an adult!"
    } else {
        "You are a minor!"
    }
}
