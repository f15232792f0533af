use std::path::PathBuf;

use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// Current weather for any city, via Open-Meteo. Run without a city for an interactive prompt.
pub struct Args {
    /// path to the configuration file
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// print the lookup result as JSON (one-shot mode only)
    #[argh(switch)]
    pub json: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// city to look up; several words are joined with spaces
    #[argh(positional)]
    pub city: Vec<String>,
}

impl Args {
    /// The one-shot query, if any words were given
    pub fn one_shot_query(&self) -> Option<String> {
        if self.city.is_empty() {
            None
        } else {
            Some(self.city.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["weathernow"], args).unwrap()
    }

    #[test]
    fn test_words_are_joined() {
        let args = parse(&["New", "York"]);
        assert_eq!(args.one_shot_query().as_deref(), Some("New York"));
        assert!(!args.json);
    }

    #[test]
    fn test_no_city_is_interactive() {
        let args = parse(&["-v"]);
        assert!(args.one_shot_query().is_none());
        assert!(args.verbose);
    }

    #[test]
    fn test_config_and_json() {
        let args = parse(&["--config", "/tmp/wn.toml", "--json", "Oslo"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/wn.toml")));
        assert!(args.json);
        assert_eq!(args.one_shot_query().as_deref(), Some("Oslo"));
    }
}
