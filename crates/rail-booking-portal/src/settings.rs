use std::{
    ffi::OsStr,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use eyre::{eyre, Result, WrapErr};
use rail_booking_core::Config;
use serde::Deserialize;

/// Name of the settings file looked up from the working directory upwards
pub const SETTINGS_FILE: &str = "rail-booking.toml";

/// Environment variable overriding the configured seed
pub const SEED_VAR: &str = "RAIL_BOOKING_SEED";

#[derive(Clone, Deserialize, Default, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// File the settings were read from, [`None`] for built-in defaults
    #[serde(skip)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub booking: Config,
}

impl Settings {
    /// Look for [`SETTINGS_FILE`] in the current directory and its ancestors.
    ///
    /// Falls back to the defaults if there is none.
    pub fn discover() -> Result<Self> {
        Self::discover_from(&std::env::current_dir()?)
    }

    /// Look for [`SETTINGS_FILE`] in `start` and its ancestors.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut path = start.to_owned();
        loop {
            path.push(SETTINGS_FILE);

            match std::fs::read_to_string(&path) {
                Ok(s) => return Self::parse(&s, path),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).wrap_err_with(|| format!("reading {}", path.display()))
                }
            }

            path.pop();
            if !path.pop() {
                return Ok(Self::default());
            }
        }
    }

    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        Self::parse(&contents, path.to_owned())
    }

    fn parse(contents: &str, path: PathBuf) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(contents).wrap_err_with(|| format!("parsing {}", path.display()))?;
        settings.path = Some(path);
        Ok(settings)
    }

    /// Apply overrides from the environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_seed(std::env::var_os(SEED_VAR).as_deref())
    }

    /// Override the seed with `value`, the contents of [`SEED_VAR`].
    pub fn apply_seed(&mut self, value: Option<&OsStr>) -> Result<()> {
        if let Some(v) = value {
            let seed = v
                .to_str()
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| eyre!("{SEED_VAR} must be a decimal u64, got {v:?}"))?;
            self.booking.seed = Some(seed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_booking_table_keeps_defaults() {
        let settings = Settings::parse(
            "[booking]\nseed = 42\nper-request-cap = 4\n",
            PathBuf::from("rail-booking.toml"),
        )
        .unwrap();
        assert_eq!(settings.booking.seed, Some(42));
        assert_eq!(settings.booking.per_request_cap, 4);
        assert_eq!(settings.booking.coaches_per_class, 5);
        assert_eq!(settings.booking.unavailable_coaches, vec![2]);
    }

    #[test]
    fn full_booking_table() {
        let settings = Settings::parse(
            r#"
            [booking]
            coaches-per-class = 8
            seat-ceiling = 72
            per-request-cap = 6
            unavailable-coaches = [0, 7]
            "#,
            PathBuf::from("rail-booking.toml"),
        )
        .unwrap();
        assert_eq!(
            settings.booking,
            Config {
                coaches_per_class: 8,
                seat_ceiling: 72,
                per_request_cap: 6,
                unavailable_coaches: vec![0, 7],
                seed: None,
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[booking]\ncoaches = 3\n", PathBuf::from("x.toml")).is_err());
        assert!(Settings::parse("[bookings]\n", PathBuf::from("x.toml")).is_err());
    }

    #[test]
    fn empty_file_means_defaults() {
        let settings = Settings::parse("", PathBuf::from("x.toml")).unwrap();
        assert_eq!(settings.booking, Config::default());
        assert_eq!(settings.path, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn discovers_workspace_settings_from_a_member_crate() {
        let start = Path::new(env!("CARGO_MANIFEST_DIR"));
        let settings = Settings::discover_from(start).unwrap();

        let workspace = start.parent().and_then(Path::parent).unwrap();
        assert_eq!(settings.path, Some(workspace.join(SETTINGS_FILE)));
        assert_eq!(settings.booking.unavailable_coaches, vec![2]);
        assert_eq!(settings.booking.per_request_cap, 6);
    }

    #[test]
    fn seed_variable_overrides_file_seed() {
        let mut settings =
            Settings::parse("[booking]\nseed = 7\n", PathBuf::from("x.toml")).unwrap();

        settings.apply_seed(None).unwrap();
        assert_eq!(settings.booking.seed, Some(7));

        settings.apply_seed(Some(OsStr::new("42"))).unwrap();
        assert_eq!(settings.booking.seed, Some(42));
    }

    #[test]
    fn malformed_seed_variable_is_an_error() {
        let mut settings = Settings::default();
        let err = settings.apply_seed(Some(OsStr::new("abc"))).unwrap_err();
        assert!(err.to_string().contains(SEED_VAR));
        assert_eq!(settings.booking.seed, None);
    }
}
