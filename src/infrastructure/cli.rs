use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of ticks per second",
        default_value_t = 4.0
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 60.0
    )]
    pub frame_rate: f64,

    #[arg(
        short,
        long = "segment",
        value_name = "LABEL",
        help = "Segment label, repeat for each segment (overrides the config)"
    )]
    pub segments: Vec<String>,

    #[arg(
        short,
        long,
        value_name = "INDEX",
        help = "Initially selected segment (overrides the config)"
    )]
    pub initial_index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["segtui"]);
        assert_eq!(cli.tick_rate, 4.0);
        assert_eq!(cli.frame_rate, 60.0);
        assert!(cli.segments.is_empty());
        assert_eq!(cli.initial_index, None);
    }

    #[test]
    fn test_segments() {
        let cli = Cli::parse_from(["segtui", "-s", "One", "--segment", "Two", "-i", "1"]);
        assert_eq!(cli.segments, vec!["One".to_owned(), "Two".to_owned()]);
        assert_eq!(cli.initial_index, Some(1));
    }
}
