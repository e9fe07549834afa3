//! Logging setup for the `naca-mesh` binary.
//!
//! The library logs through the [`log`] facade and never installs a logger itself. The binary
//! calls [`init_with_level`] once, which configures [`env_logger`] with a default filter for this
//! crate. Setting `RUST_LOG` overrides that default:
//!
//! ```sh
//! $> RUST_LOG=naca_mesh=debug naca-mesh --num-points 500
//! ```

use log::LevelFilter;

const CRATES: &[&str] = &["naca_mesh"];

/// Whether log output may contain ANSI colour codes. Passed explicitly rather than read from
/// the environment at the point of use.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Never,
}

impl ColorChoice {
    /// `Never` when colours were disabled on the command line or `NO_COLOR` is set to anything
    /// non-empty
    pub fn resolve(disabled: bool, no_color_env: Option<&str>) -> ColorChoice {
        if disabled || no_color_env.map_or(false, |v| !v.is_empty()) {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        }
    }
}

fn filter_string(crates: &[&str], log_level: LevelFilter) -> String {
    let level_str = log_level.as_str().to_lowercase();
    crates
        .iter()
        .map(|pkg_name| format!("{}={}", pkg_name, level_str))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn init_with_level(log_level: LevelFilter, color: ColorChoice) {
    let env = env_logger::Env::default().default_filter_or(filter_string(CRATES, log_level));
    let style = match color {
        ColorChoice::Auto => env_logger::WriteStyle::Auto,
        ColorChoice::Never => env_logger::WriteStyle::Never,
    };

    env_logger::Builder::from_env(env)
        .write_style(style)
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(false, None, ColorChoice::Auto)]
    #[test_case(false, Some(""), ColorChoice::Auto)]
    #[test_case(false, Some("1"), ColorChoice::Never)]
    #[test_case(true, None, ColorChoice::Never)]
    fn test_color_choice(disabled: bool, env: Option<&str>, e: ColorChoice) {
        assert_eq!(e, ColorChoice::resolve(disabled, env));
    }

    #[test]
    fn test_filter_string() {
        assert_eq!("naca_mesh=debug", filter_string(CRATES, LevelFilter::Debug));
        assert_eq!("a=warn,b=warn", filter_string(&["a", "b"], LevelFilter::Warn));
    }
}
