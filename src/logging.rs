#[doc(hidden)]
pub use better_term::{Color, Style};

#[doc(hidden)]
pub fn stamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[macro_export]
macro_rules! say {
    ($($arg:tt)*) => {
        println!(
            "{}[{}] {}> {}{}",
            $crate::logging::Color::BrightBlack,
            $crate::logging::stamp(),
            $crate::logging::Color::BrightWhite,
            format!($($arg)*),
            $crate::logging::Style::reset()
        )
    };
}

#[macro_export]
macro_rules! yay {
    ($($arg:tt)*) => {
        println!(
            "{}[{}] {}+ {}{}",
            $crate::logging::Color::BrightBlack,
            $crate::logging::stamp(),
            $crate::logging::Color::BrightGreen,
            format!($($arg)*),
            $crate::logging::Style::reset()
        )
    };
}

#[macro_export]
macro_rules! hey {
    ($($arg:tt)*) => {
        println!(
            "{}[{}] {}! {}{}",
            $crate::logging::Color::BrightBlack,
            $crate::logging::stamp(),
            $crate::logging::Color::BrightYellow,
            format!($($arg)*),
            $crate::logging::Style::reset()
        )
    };
}

#[macro_export]
macro_rules! nay {
    ($($arg:tt)*) => {
        eprintln!(
            "{}[{}] {}x {}{}",
            $crate::logging::Color::BrightBlack,
            $crate::logging::stamp(),
            $crate::logging::Color::BrightRed,
            format!($($arg)*),
            $crate::logging::Style::reset()
        )
    };
}
