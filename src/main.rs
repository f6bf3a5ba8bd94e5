/*
 *  main.rs
 *
 *  serialtft - Hobbytronics serial TFT driver
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::info;

use serialtft::config::{self, Action, Cli, Config};
use serialtft::demo;
use serialtft::display::{BoxedLink, Link, MockLink, SerialTft};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli).context("loading configuration")?;

    if cli.dump_config {
        print!("{}", serde_yaml::to_string(&cfg).context("serializing configuration")?);
        return Ok(());
    }

    let Some(action) = cli.action.clone() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let level = if cli.debug { "debug" } else { cfg.log_level.as_deref().unwrap_or("info") };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {} for {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_TARGET);

    let mut options = cfg.tft_options();
    let explicit_clear = cfg.connection.as_ref().and_then(|c| c.clear_on_exit).is_some();
    if action.leaves_output() && !explicit_clear {
        options.clear_on_exit = false;
    }

    let recorder = cli.dry_run.then(MockLink::new);
    let link: BoxedLink = match recorder.as_ref() {
        Some(mock) => {
            info!("dry run, nothing is sent to {}", cfg.device());
            Box::new(mock.clone())
        }
        None => open_link(&cfg)?,
    };

    run(SerialTft::with_link(link, options), &cfg, action)?;

    if let Some(mock) = recorder {
        for line in mock.transcript() {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(unix)]
fn open_link(cfg: &Config) -> Result<BoxedLink> {
    use serialtft::display::SerialLink;

    let link = SerialLink::open(cfg.device(), cfg.baud_rate())
        .with_context(|| format!("opening {} at {} baud", cfg.device(), cfg.baud_rate()))?;
    Ok(Box::new(link))
}

#[cfg(not(unix))]
fn open_link(_cfg: &Config) -> Result<BoxedLink> {
    anyhow::bail!("serial devices are only supported on unix hosts, try --dry-run")
}

/// Screen setup from config, the action itself, then an explicit teardown
fn run<L: Link>(mut tft: SerialTft<L>, cfg: &Config, action: Action) -> Result<()> {
    if let Some(screen) = cfg.screen.as_ref() {
        if let Some(rotation) = screen.rotation {
            tft.screen_rotation(rotation)?;
        }
        if let Some(background) = screen.background {
            tft.bg_color(background)?;
        }
        if let Some(theme) = screen.theme {
            tft.set_theme(theme)?;
        }
    }

    match action {
        Action::Clear => tft.clear_screen()?,
        Action::Text { text, line, col, row, font, color } => {
            if let Some(font) = font {
                tft.font_size(font)?;
            }
            if let Some(color) = color {
                tft.fg_color(color)?;
            }
            if let (Some(col), Some(row)) = (col, row) {
                tft.goto_char(col, row)?;
            }
            if line {
                tft.write_line(&text)?;
            } else {
                tft.write(&text)?;
            }
        }
        Action::Theme { theme } => tft.set_theme(theme)?,
        Action::Palette { slot, hex } => tft
            .set_color_hex(slot, &hex)
            .with_context(|| format!("setting {:?} to {:?}", slot, hex))?,
        Action::Brightness { level } => tft.brightness(level)?,
        Action::Clock { seconds } => demo::run_clock(&mut tft, seconds)?,
        Action::Rain { frames } => demo::run_rain(&mut tft, frames, &mut rand::rng())?,
        Action::Bars => demo::run_bars(&mut tft, &mut rand::rng())?,
    }

    tft.close().context("closing display")?;
    Ok(())
}
