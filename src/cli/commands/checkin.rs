use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CheckInDesk, policy_from};
use crate::errors::AppResult;
use crate::location::{Fix, FixedPosition, LocationResolver, NoGeocoder, ResolvedLocation};
use crate::repo::Store;
use crate::ui::messages::{info, success};
use crate::utils::date::{now, parse_timestamp};
use crate::utils::path::expand_tilde;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config, store: &Store) -> AppResult<()> {
    if let Commands::Checkin {
        project,
        member,
        photo,
        lat,
        lon,
        location,
        at,
    } = cmd
    {
        let at = match at {
            Some(s) => parse_timestamp(s)?,
            None => now(),
        };

        let mut desk = CheckInDesk::open(store, policy_from(cfg), *project)?;

        let fix = (*lat).zip(*lon).map(|(la, lo)| Fix::new(la, lo));
        let place = resolve_location(cfg, fix, location.as_deref())?;
        info(format!("Location: {}", place.address));

        let ci = desk.check_in(member, at, &place, &expand_tilde(photo))?;
        success(format!(
            "{} checked in at {} (record {})",
            ci.member_name,
            ci.timestamp_str(),
            ci.id
        ));
    }

    Ok(())
}

/// Text given on the command line wins; otherwise the coordinates go
/// through the resolver like any other position source.
fn resolve_location(
    cfg: &Config,
    fix: Option<Fix>,
    text: Option<&str>,
) -> AppResult<ResolvedLocation> {
    if let Some(text) = text {
        return Ok(ResolvedLocation {
            address: text.trim().to_string(),
            latitude: fix.map_or(0.0, |f| f.latitude),
            longitude: fix.map_or(0.0, |f| f.longitude),
        });
    }

    let resolver = LocationResolver::new(Box::new(NoGeocoder))
        .with_provider(Box::new(FixedPosition::new(fix)))
        .with_timeout(Duration::from_secs(cfg.location_timeout_secs));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    Ok(rt.block_on(resolver.resolve())?)
}
