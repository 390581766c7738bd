//! Interactive configuration setup.
//!
//! Asks which sections to configure (server, client), prompts for each value
//! with the current setting as default, and writes `config.json`.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
