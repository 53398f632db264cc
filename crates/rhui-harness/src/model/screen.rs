use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One modal menu context of the console.
///
/// The name is what the console prints inside its prompt, `rhui (<name>) => `.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    Repo,
    Cds,
    #[serde(rename = "loadbalancers")]
    LoadBalancers,
    Sync,
    Entitlements,
    Users,
    Client,
    Subscriptions,
}

impl Screen {
    /// Every screen reachable from home, in menu order.
    pub const SUB_SCREENS: [Screen; 8] = [
        Screen::Repo,
        Screen::Cds,
        Screen::LoadBalancers,
        Screen::Sync,
        Screen::Client,
        Screen::Entitlements,
        Screen::Users,
        Screen::Subscriptions,
    ];

    /// Name shown in the console prompt.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Repo => "repo",
            Self::Cds => "cds",
            Self::LoadBalancers => "loadbalancers",
            Self::Sync => "sync",
            Self::Entitlements => "entitlements",
            Self::Users => "users",
            Self::Client => "client",
            Self::Subscriptions => "subscriptions",
        }
    }

    /// Keystrokes that enter this screen from home. `None` for home itself.
    #[must_use]
    pub fn hotkey(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::Repo => Some("r"),
            Self::Cds => Some("c"),
            Self::LoadBalancers => Some("l"),
            Self::Sync => Some("s"),
            Self::Client => Some("e"),
            Self::Entitlements => Some("n"),
            Self::Users => Some("u"),
            Self::Subscriptions => Some("sm"),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        std::iter::once(Screen::Home)
            .chain(Screen::SUB_SCREENS)
            .find(|screen| screen.name() == s)
            .ok_or_else(|| format!("unknown console screen '{s}'"))
    }
}

/// Where a session's console conversation currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "screen")]
pub enum ConsoleState {
    /// The console is not running in the channel (plain shell).
    LoggedOut,
    /// The console is running and showing this screen's prompt.
    At(Screen),
}

impl ConsoleState {
    /// Current screen, if the console is running.
    #[must_use]
    pub fn screen(self) -> Option<Screen> {
        match self {
            Self::LoggedOut => None,
            Self::At(screen) => Some(screen),
        }
    }
}

impl fmt::Display for ConsoleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => f.write_str("logged-out"),
            Self::At(screen) => write!(f, "{screen}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for screen in Screen::SUB_SCREENS {
            assert_eq!(screen.name().parse::<Screen>(), Ok(screen));
        }
        assert_eq!("home".parse::<Screen>(), Ok(Screen::Home));
        assert!("identity".parse::<Screen>().is_err());
    }

    #[test]
    fn only_home_lacks_a_hotkey() {
        assert_eq!(Screen::Home.hotkey(), None);
        assert!(Screen::SUB_SCREENS.iter().all(|s| s.hotkey().is_some()));
        assert_eq!(Screen::Subscriptions.hotkey(), Some("sm"));
    }
}
