//! Per-platform descriptor table.
//!
//! One entry per [`Platform`] captures everything that differs between the
//! hosted integrations: where the foreign SDK script lives, which global it
//! attaches, what a script-load failure means, whether preroll exists, and
//! which API names the platform supports. The shared
//! [`super::hosted::HostedAdapter`] is parameterized by an entry from this
//! table, so adding a platform is a table row, not a class hierarchy.

use hostbridge_domain::Platform;

/// Static description of one hosted platform integration.
#[derive(Debug)]
pub struct PlatformDescriptor {
    pub platform: Platform,
    /// Foreign SDK script URL; `None` when the platform needs no script.
    pub sdk_url: Option<&'static str>,
    /// Global object the script attaches, checked after load.
    pub sdk_global: Option<&'static str>,
    /// Whether a script-load failure means "ad blocker detected" rather
    /// than a broken platform. True for ad-serving SDKs, which are the
    /// first thing blockers kill.
    pub script_failure_is_ad_block: bool,
    /// Whether the platform can show a preroll placement.
    pub supports_preroll: bool,
    /// Whether the global attaches noticeably after script `onload`
    /// (observed on Telegram and CrazyGames); the adapter polls briefly
    /// before judging the load.
    pub late_global_attach: bool,
    pub supported_apis: &'static [&'static str],
}

static WORTAL: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Wortal,
    sdk_url: Some("https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js"),
    sdk_global: Some("adsbygoogle"),
    script_failure_is_ad_block: true,
    supports_preroll: true,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showBanner",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "session.getEntryPointData",
        "session.getLocale",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
    ],
};

static LINK: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Link,
    sdk_url: Some("https://lg.rgames.jp/libs/link-game-sdk/1.3.0/bundle.js"),
    sdk_global: Some("LinkGame"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "session.getEntryPointData",
        "session.getLocale",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "core.authenticateAsync",
        "core.linkAccountAsync",
        "iap.isEnabled",
        "iap.getCatalogAsync",
        "iap.getPurchasesAsync",
        "iap.makePurchaseAsync",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

static VIBER: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Viber,
    sdk_url: Some("https://vbrpl.io/libs/quickstart/latest/viber-play-sdk.js"),
    sdk_global: Some("ViberPlay"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "session.getEntryPointData",
        "session.getLocale",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "iap.isEnabled",
        "iap.getCatalogAsync",
        "iap.getPurchasesAsync",
        "iap.makePurchaseAsync",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

static FACEBOOK: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Facebook,
    sdk_url: Some("https://connect.facebook.net/en_US/fbinstant.7.1.js"),
    sdk_global: Some("FBInstant"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showBanner",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "session.getEntryPointData",
        "session.getLocale",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "iap.isEnabled",
        "iap.getCatalogAsync",
        "iap.getPurchasesAsync",
        "iap.makePurchaseAsync",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

static GD: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Gd,
    sdk_url: Some("https://html5.api.gamedistribution.com/main.min.js"),
    sdk_global: Some("gdsdk"),
    script_failure_is_ad_block: true,
    supports_preroll: true,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
    ],
};

static CRAZYGAMES: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::CrazyGames,
    sdk_url: Some("https://sdk.crazygames.com/crazygames-sdk-v2.js"),
    sdk_global: Some("CrazyGames"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: true,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showBanner",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "core.authenticateAsync",
        "core.linkAccountAsync",
    ],
};

static GAMEPIX: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::GamePix,
    sdk_url: Some("https://integration.gamepix.com/sdk/v3/gamepix.sdk.js"),
    sdk_global: Some("GamePix"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
    ],
};

static POKI: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Poki,
    sdk_url: Some("https://game-cdn.poki.com/scripts/v2/poki-sdk.js"),
    sdk_global: Some("PokiSDK"),
    script_failure_is_ad_block: true,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
    ],
};

static TELEGRAM: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Telegram,
    sdk_url: Some("https://telegram.org/js/games.js"),
    sdk_global: Some("TelegramGameProxy"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: true,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "session.getEntryPointData",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

static GAMEMONETIZE: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::GameMonetize,
    sdk_url: Some("https://api.gamemonetize.com/sdk.js"),
    sdk_global: Some("sdk"),
    script_failure_is_ad_block: true,
    supports_preroll: true,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
    ],
};

static ADDICTINGGAMES: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::AddictingGames,
    sdk_url: Some("https://swagapi.shockwave.com/dist/swag-api.js"),
    sdk_global: Some("SWAGAPI"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showInterstitial",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

static YANDEX: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Yandex,
    sdk_url: Some("https://yandex.ru/games/sdk/v2"),
    sdk_global: Some("YaGames"),
    script_failure_is_ad_block: false,
    supports_preroll: false,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showBanner",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "core.authenticateAsync",
        "iap.isEnabled",
        "iap.getCatalogAsync",
        "iap.getPurchasesAsync",
        "iap.makePurchaseAsync",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

static DEBUG: PlatformDescriptor = PlatformDescriptor {
    platform: Platform::Debug,
    sdk_url: None,
    sdk_global: None,
    script_failure_is_ad_block: false,
    supports_preroll: true,
    late_global_attach: false,
    supported_apis: &[
        "ads.isAdBlocked",
        "ads.showBanner",
        "ads.showInterstitial",
        "ads.showRewarded",
        "analytics.logGameStart",
        "analytics.logGameEnd",
        "analytics.logLevelStart",
        "analytics.logLevelEnd",
        "analytics.logGameChoice",
        "player.getID",
        "player.getName",
        "player.getPhoto",
        "player.isFirstPlay",
        "player.getDataAsync",
        "player.setDataAsync",
        "session.getEntryPointData",
        "session.getLocale",
        "core.setLoadingProgress",
        "core.onPause",
        "core.getSupportedAPIs",
        "core.authenticateAsync",
        "core.linkAccountAsync",
        "iap.isEnabled",
        "iap.getCatalogAsync",
        "iap.getPurchasesAsync",
        "iap.makePurchaseAsync",
        "leaderboard.getEntriesAsync",
        "leaderboard.sendEntryAsync",
    ],
};

/// Look up the descriptor for a platform. Total over the enum.
pub fn descriptor(platform: Platform) -> &'static PlatformDescriptor {
    match platform {
        Platform::Wortal => &WORTAL,
        Platform::Link => &LINK,
        Platform::Viber => &VIBER,
        Platform::Facebook => &FACEBOOK,
        Platform::Gd => &GD,
        Platform::CrazyGames => &CRAZYGAMES,
        Platform::GamePix => &GAMEPIX,
        Platform::Poki => &POKI,
        Platform::Telegram => &TELEGRAM,
        Platform::GameMonetize => &GAMEMONETIZE,
        Platform::AddictingGames => &ADDICTINGGAMES,
        Platform::Yandex => &YANDEX,
        Platform::Debug => &DEBUG,
    }
}
