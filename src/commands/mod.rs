use reaction_menus::config::ConfigSettings;
use reaction_menus::menus::MenuNotification;
use serenity::all::{ResolvedOption, ResolvedValue};
use tokio::sync::broadcast;

pub(crate) mod colour;
pub(crate) mod confirm;
pub(crate) mod pages;
pub(crate) mod pick;

pub struct MenuEnv<'a> {
    pub config: &'a ConfigSettings,
    pub notifications: &'a broadcast::Sender<MenuNotification>,
}

pub fn string_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find_map(|opt| match opt {
        ResolvedOption {
            name: n,
            value: ResolvedValue::String(value),
            ..
        } if *n == name => Some(*value),
        _ => None,
    })
}

pub fn bool_option(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    options.iter().find_map(|opt| match opt {
        ResolvedOption {
            name: n,
            value: ResolvedValue::Boolean(value),
            ..
        } if *n == name => Some(*value),
        _ => None,
    })
}

pub fn integer_option(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find_map(|opt| match opt {
        ResolvedOption {
            name: n,
            value: ResolvedValue::Integer(value),
            ..
        } if *n == name => Some(*value),
        _ => None,
    })
}
