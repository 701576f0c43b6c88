use anyhow::{Context, Result, anyhow};

use courtvision_terminal::api;
use courtvision_terminal::config::Config;
use courtvision_terminal::player_form::{PlayerForm, PlayerPatch, parse_optional_number};

const USAGE: &str = "\
usage:
  player_admin list [--name=<text>]
  player_admin add --name=<name> [--birth-date=YYYY-MM-DD] [--height=<in>] [--weight=<lbs>] [--position=<pos>] [--jersey=<n>]
  player_admin update --id=<id> [--name=<name>] [same optional fields as add]
  player_admin delete --id=<id>";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = Config::from_env();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = args.first() else {
        return Err(anyhow!("missing command\n{USAGE}"));
    };
    let flags = &args[1..];

    match command.as_str() {
        "list" => {
            let name = flag_value(flags, "name");
            let players = api::fetch_players(&config, name.as_deref())?;
            for p in &players {
                println!(
                    "{:>5}  {:<28} {:<4} {}",
                    p.id,
                    p.name,
                    p.position.as_deref().unwrap_or("-"),
                    p.jersey_number.map(|n| format!("#{n}")).unwrap_or_default()
                );
            }
            println!("{} player(s)", players.len());
        }
        "add" => {
            let form = form_from_flags(flags)?;
            let player_id = api::create_player(&config, &form)?;
            println!("Player created successfully (id {player_id})");
        }
        "update" => {
            let player_id = id_flag(flags)?;
            let patch = patch_from_flags(flags)?;
            if patch.is_empty() {
                return Err(anyhow!("nothing to update\n{USAGE}"));
            }
            let current = api::fetch_player(&config, player_id)?
                .ok_or_else(|| anyhow!("player {player_id} not found"))?;
            let form = patch.apply_to(&current);
            form.validate()?;
            api::update_player(&config, player_id, &form)?;
            println!("Player {player_id} updated successfully");
        }
        "delete" => {
            let player_id = id_flag(flags)?;
            api::delete_player(&config, player_id)?;
            println!("Player {player_id} deleted successfully");
        }
        "help" | "--help" | "-h" => println!("{USAGE}"),
        other => return Err(anyhow!("unknown command {other:?}\n{USAGE}")),
    }
    Ok(())
}

fn form_from_flags(flags: &[String]) -> Result<PlayerForm> {
    let form = patch_from_flags(flags)?.apply_to(&PlayerForm::default());
    form.validate()?;
    Ok(form)
}

fn patch_from_flags(flags: &[String]) -> Result<PlayerPatch> {
    Ok(PlayerPatch {
        player_name: flag_value(flags, "name"),
        birth_date: flag_value(flags, "birth-date"),
        height_inches: parse_optional_number("height_inches", flag_value(flags, "height").as_deref())?,
        weight_lbs: parse_optional_number("weight_lbs", flag_value(flags, "weight").as_deref())?,
        position: flag_value(flags, "position"),
        jersey_number: parse_optional_number("jersey_number", flag_value(flags, "jersey").as_deref())?,
    })
}

fn id_flag(flags: &[String]) -> Result<u32> {
    let raw = flag_value(flags, "id").context("--id is required")?;
    raw.parse::<u32>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| anyhow!("invalid player id {raw:?}"))
}

// Accepts both `--key=value` and `--key value`.
fn flag_value(flags: &[String], key: &str) -> Option<String> {
    let long = format!("--{key}");
    let prefix = format!("{long}=");
    for (idx, arg) in flags.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == long
            && let Some(next) = flags.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}
