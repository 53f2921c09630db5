pub mod progression;
pub mod utility;

use ascent_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    progression::register::META,
    progression::profile::META,
    progression::checkin::META,
    progression::redeem::META,
    progression::titles::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        utility::ping::ping(),
        utility::help::help(),
        utility::usage::usage(),
        progression::register::register(),
        progression::profile::profile(),
        progression::checkin::checkin(),
        progression::redeem::redeem(),
        progression::titles::titles(),
    ]
}
