//! Platform detection.
//!
//! [`resolve`] maps the hosting domain plus the launch URL's query
//! parameters to exactly one [`Platform`]. It is pure, deterministic, and
//! total: every input resolves to a value, with unmatched domains falling
//! back to [`Platform::Debug`] so local development needs no configuration.

use std::collections::HashMap;

use crate::platform::Platform;

/// Domain suffixes for each platform with a recognizable hosting domain.
///
/// Telegram is absent on purpose: Telegram games are iframed into the
/// portal's own domain and are recognized by query parameter instead.
const DOMAIN_TABLE: &[(Platform, &[&str])] = &[
    (Platform::Wortal, &["html5gameportal.com", "wortal.ai"]),
    (Platform::Link, &["rgames.jp", "lg.games.rakuten.co.jp"]),
    (Platform::Viber, &["vbrpl.io", "vbrplsbx.io"]),
    (Platform::Facebook, &["fbsbx.com", "facebook.com"]),
    (Platform::Gd, &["gamedistribution.com", "revision.app"]),
    (Platform::CrazyGames, &["crazygames.com", "1001juegos.com"]),
    (Platform::GamePix, &["gamepix.com"]),
    (Platform::Poki, &["poki.com", "poki-gdn.com"]),
    (Platform::GameMonetize, &["gamemonetize.co", "gamemonetize.com"]),
    (Platform::AddictingGames, &["addictinggames.com", "shockwave.com"]),
    (Platform::Yandex, &["yandex.net", "yandex.ru", "playhop.com"]),
];

/// Query parameters that mark a game iframed into a wrapper platform.
///
/// Games served from a portal domain can still be running inside the
/// Telegram or Viber wrapper; the wrapper adds one of these parameters, and
/// the parameter wins over the domain match.
const TELEGRAM_PARAMS: &[&str] = &["telegram", "telegram_bot"];
const VIBER_PARAM: &str = "viber";

/// Resolve the hosting platform from the host domain and query parameters.
///
/// Same input always yields the same output, and every input yields a
/// value. Called synchronously at startup, before anything else.
pub fn resolve(host_domain: &str, query: &HashMap<String, String>) -> Platform {
    let host = host_domain.trim().to_ascii_lowercase();

    match domain_match(&host) {
        // Wrapper override: a portal-hosted game iframed into Telegram or
        // Viber must use the wrapper's adapter, not the portal's.
        Some(Platform::Wortal) => {
            if TELEGRAM_PARAMS.iter().any(|p| query.contains_key(*p)) {
                Platform::Telegram
            } else if query.contains_key(VIBER_PARAM) {
                Platform::Viber
            } else {
                Platform::Wortal
            }
        }
        Some(platform) => platform,
        None => Platform::Debug,
    }
}

fn domain_match(host: &str) -> Option<Platform> {
    for (platform, suffixes) in DOMAIN_TABLE {
        if suffixes
            .iter()
            .any(|s| host == *s || host.ends_with(&format!(".{s}")))
        {
            return Some(*platform);
        }
    }
    None
}
