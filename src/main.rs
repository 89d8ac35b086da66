use anyhow::{anyhow, Context, Result};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use serde_yaml::Value as Yaml;
use siteconf::config::THEME_ENV;
use siteconf::feed::Feeds;
use siteconf::SiteConfiguration;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let matches = app().get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let config = load(&matches)?.with_theme_override(std::env::var(THEME_ENV).ok());
    log::debug!("Project root is '{}'", config.project_root().display());

    match matches.subcommand() {
        ("show", Some(_)) => print!("{}", show(&config)?),
        ("get", Some(sub)) => {
            println!("{}", get(&config, sub.value_of("key").unwrap_or_default())?)
        }
        ("feeds", Some(_)) => {
            for line in feeds(&config.feeds()) {
                println!("{}", line);
            }
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn app() -> App<'static, 'static> {
    App::new("siteconf")
        .version(crate_version!())
        .about("Loads and inspects the site configuration for Weiming's Blog")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("directory")
                .short("C")
                .long("directory")
                .value_name("DIR")
                .takes_value(true)
                .help("Searches DIR and its parents for siteconf.yaml [default: current directory]"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .conflicts_with("directory")
                .help("Loads FILE instead of searching for siteconf.yaml"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increases log verbosity (-v, -vv, -vvv)"),
        )
        .subcommand(SubCommand::with_name("show").about("Prints every setting as YAML"))
        .subcommand(
            SubCommand::with_name("get")
                .about("Prints a single setting")
                .arg(
                    Arg::with_name("key")
                        .required(true)
                        .index(1)
                        .help("The setting name, e.g. SITENAME"),
                ),
        )
        .subcommand(SubCommand::with_name("feeds").about("Lists the enabled feeds"))
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load(matches: &ArgMatches) -> Result<SiteConfiguration> {
    if let Some(file) = matches.value_of("config") {
        return SiteConfiguration::from_project_file(Path::new(file))
            .with_context(|| format!("Loading configuration file `{}`", file));
    }
    let dir = match matches.value_of("directory") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Getting the current directory")?,
    };
    SiteConfiguration::from_directory(&dir).context("Loading configuration")
}

fn show(config: &SiteConfiguration) -> Result<String> {
    Ok(serde_yaml::to_string(&config.to_settings()?)?)
}

fn get(config: &SiteConfiguration, key: &str) -> Result<String> {
    match config.get(key)? {
        Some(value) => render(&value),
        None => Err(anyhow!("Unknown setting `{}`", key)),
    }
}

fn feeds(feeds: &Feeds) -> Vec<String> {
    let enabled = feeds.enabled();
    if enabled.is_empty() {
        return vec![String::from("no feeds enabled")];
    }
    enabled
        .into_iter()
        .map(|(name, pattern)| format!("{}: {}", name, pattern))
        .collect()
}

// Scalars print bare so the output can be used in shell scripts; everything
// else prints as YAML.
fn render(value: &Yaml) -> Result<String> {
    Ok(match value {
        Yaml::Null => String::from("null"),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) => s.clone(),
        _ => serde_yaml::to_string(value)?
            .trim_start_matches("---\n")
            .trim_end()
            .to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
AUTHOR: Somebody
SITENAME: Somebody's Site
SITEURL: https://example.org
SOCIAL:
  - [GitHub, 'https://github.com/somebody']
DEFAULT_PAGINATION: 5
";

    #[test]
    fn test_render_scalars_bare() -> Result<()> {
        assert_eq!(render(&Yaml::Null)?, "null");
        assert_eq!(render(&Yaml::Bool(true))?, "true");
        assert_eq!(render(&Yaml::Number(10u64.into()))?, "10");
        assert_eq!(render(&Yaml::String("Weiming's Blog".to_owned()))?, "Weiming's Blog");
        Ok(())
    }

    #[test]
    fn test_render_sequence_without_header() -> Result<()> {
        let rendered = render(&Yaml::Sequence(vec![
            Yaml::String("md".to_owned()),
            Yaml::String("ipynb".to_owned()),
        ]))?;
        assert!(!rendered.starts_with("---"), "unexpected header: {}", rendered);
        assert_eq!(rendered, "- md\n- ipynb");
        Ok(())
    }

    #[test]
    fn test_get() -> Result<()> {
        let config: SiteConfiguration = MINIMAL.parse()?;
        assert_eq!(get(&config, "sitename")?, "Somebody's Site");
        assert_eq!(get(&config, "DEFAULT_PAGINATION")?, "5");
        assert!(get(&config, "SOCIAL")?.contains("GitHub"));
        Ok(())
    }

    #[test]
    fn test_get_unknown_key() -> Result<()> {
        let config: SiteConfiguration = MINIMAL.parse()?;
        let err = get(&config, "SITE_NAME").unwrap_err();
        assert_eq!(err.to_string(), "Unknown setting `SITE_NAME`");
        Ok(())
    }

    #[test]
    fn test_show_lists_settings() -> Result<()> {
        let config: SiteConfiguration = MINIMAL.parse()?;
        let shown = show(&config)?;
        assert!(shown.contains("SITENAME:"), "unexpected output: {}", shown);
        assert!(shown.contains("Somebody's Site"), "unexpected output: {}", shown);
        assert!(shown.contains("FEED_ALL_ATOM: ~"), "unexpected output: {}", shown);
        Ok(())
    }

    #[test]
    fn test_feeds_none_enabled() -> Result<()> {
        let config: SiteConfiguration = MINIMAL.parse()?;
        assert_eq!(feeds(&config.feeds()), vec!["no feeds enabled"]);
        Ok(())
    }

    #[test]
    fn test_feeds_enabled() -> Result<()> {
        let config: SiteConfiguration =
            format!("{}FEED_ALL_ATOM: true\nCATEGORY_FEED_ATOM: false\n", MINIMAL).parse()?;
        assert_eq!(
            feeds(&config.feeds()),
            vec!["FEED_ALL_ATOM: feeds/all.atom.xml"]
        );
        Ok(())
    }

    #[test]
    fn test_directory_conflicts_with_config() {
        let result = app().get_matches_from_safe(vec![
            "siteconf",
            "-C",
            "blog",
            "-c",
            "blog/siteconf.yaml",
            "show",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(app().get_matches_from_safe(vec!["siteconf"]).is_err());
    }

    #[test]
    fn test_get_requires_key() {
        assert!(app().get_matches_from_safe(vec!["siteconf", "get"]).is_err());
        let matches = app()
            .get_matches_from_safe(vec!["siteconf", "-vv", "get", "THEME"])
            .unwrap();
        assert_eq!(matches.occurrences_of("verbose"), 2);
        match matches.subcommand() {
            ("get", Some(sub)) => assert_eq!(sub.value_of("key"), Some("THEME")),
            _ => panic!("expected the get subcommand"),
        }
    }
}
