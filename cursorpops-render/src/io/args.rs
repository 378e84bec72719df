/*
 * Command line arguments
 *
 * nothing in here fails: a malformed value keeps its default.
 */
use crate::io::{
    color::{parse_color, Color},
    velocity::{parse_velocity, Velocity},
};

pub const USAGE: &str = "\
Usage: cursorpops <options> <text>

Options:
  -h, --help             Show this help message
  -t, --text <text>      Text to display
  -f, --follow           Follow cursor (default: static)
  -b, --block            Run in blocking mode
  -d, --duration <sec>   Display duration in seconds (default: 3)
  -e, --ease [<sec>]     Enable fade out effect (optional duration, default: 1s)
  -o, --outline [<color>]
                         Add outline effect (optional color, default: black)
  -c, --color <color>    Set text color (default: white)
  -v, --velocity <x,y>   Movement velocity in pixels/second
                         Can be single number for vertical movement only

Color formats for -o and -c:
  #RRGGBB, R,G,B, or R.R,G.G,B.B
  Note: #FF00FF (magenta) will be adjusted slightly

Examples:
  cursorpops \"Hello World\"
  cursorpops \"Rising\" -v -1.5
  cursorpops \"Moving\" -v 1.0,-1.0
  cursorpops -t \"Float\" -v 0,-2 -d 5 -e 2
";

pub const DEFAULT_TEXT: &str = "Sample Text";
pub const DEFAULT_DISPLAY_MS: u32 = 3000;
pub const DEFAULT_EASE_OUT_MS: u32 = 1000;

/// Everything a single popup needs. Built once per process.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub text: String,
    pub follow: bool,
    pub block: bool,
    pub outline: bool,
    pub ease: bool,
    pub ease_out_ms: u32,
    pub display_ms: u32,
    pub outline_color: Color,
    pub text_color: Color,
    pub velocity: Velocity,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            text: DEFAULT_TEXT.to_string(),
            follow: false,
            block: false,
            outline: false,
            ease: false,
            ease_out_ms: DEFAULT_EASE_OUT_MS,
            display_ms: DEFAULT_DISPLAY_MS,
            outline_color: Color::BLACK,
            text_color: Color::WHITE,
            velocity: Velocity::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Help,
    Show(Options),
}

/// Splits on spaces, keeping double-quoted runs together. Quotes are dropped.
pub fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in raw.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

pub fn parse(raw: &str) -> Command {
    parse_tokens(tokenize(raw))
}

pub fn parse_tokens<I, S>(tokens: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = tokens
        .into_iter()
        .map(Into::into)
        .filter(|arg| !arg.is_empty())
        .collect();

    if args.is_empty() || args.iter().any(|arg| arg == "-h" || arg == "--help") {
        return Command::Help;
    }

    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        let next = args.get(i + 1).map(String::as_str);
        // a value that cannot be mistaken for the next flag
        let value = next.filter(|v| !v.starts_with('-'));

        match args[i].as_str() {
            "-f" | "--follow" => options.follow = true,
            "-b" | "--block" => options.block = true,
            "-t" | "--text" => {
                if let Some(text) = next {
                    options.text = text.to_string();
                    i += 1;
                }
            }
            "-v" | "--velocity" => {
                if let Some(velocity) = next {
                    options.velocity = parse_velocity(velocity);
                    i += 1;
                }
            }
            "-o" | "--outline" => {
                options.outline = true;
                if let Some(color) = value {
                    options.outline_color = parse_color(color).visible();
                    i += 1;
                }
            }
            "-c" | "--color" => {
                if let Some(color) = value {
                    options.text_color = parse_color(color).visible();
                    i += 1;
                }
            }
            "-d" | "--duration" => {
                if let Some(ms) = value.and_then(seconds_to_ms) {
                    options.display_ms = ms;
                    i += 1;
                }
            }
            "-e" | "--ease" => {
                options.ease = true;
                if let Some(ms) = value.and_then(seconds_to_ms) {
                    options.ease_out_ms = ms;
                    i += 1;
                }
            }
            arg if !arg.starts_with('-') => options.text = arg.to_string(),
            arg => log::debug!("ignoring unknown flag {arg}"),
        }

        i += 1;
    }

    Command::Show(options)
}

fn seconds_to_ms(value: &str) -> Option<u32> {
    let seconds = value.trim().parse::<f64>().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some((seconds * 1000.0).round() as u32)
}

fn ms_to_seconds(ms: u32) -> String {
    format!("{}", ms as f64 / 1000.0)
}

impl Options {
    /// Re-serializes every non-default option. Feeding the result back to
    /// [`parse_tokens`] gives an equal `Options`.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-t".to_string(), self.text.clone()];

        if self.follow {
            args.push("-f".into());
        }
        if self.outline {
            args.push("-o".into());
            if self.outline_color != Color::BLACK {
                args.push(self.outline_color.to_literal());
            }
        }
        if self.text_color != Color::WHITE {
            args.push("-c".into());
            args.push(self.text_color.to_literal());
        }
        if self.ease {
            args.push("-e".into());
            if self.ease_out_ms != DEFAULT_EASE_OUT_MS {
                args.push(ms_to_seconds(self.ease_out_ms));
            }
        }
        if self.display_ms != DEFAULT_DISPLAY_MS {
            args.push("-d".into());
            args.push(ms_to_seconds(self.display_ms));
        }
        if !self.velocity.is_zero() {
            args.push("-v".into());
            args.push(self.velocity.to_literal());
        }
        if self.block {
            args.push("-b".into());
        }

        args
    }

    /// [`Options::to_args`] as one string for [`parse`]. Text containing a
    /// double quote cannot be represented.
    pub fn to_command_line(&self) -> String {
        self.to_args()
            .into_iter()
            .map(|arg| {
                if arg.is_empty() || arg.contains(char::is_whitespace) {
                    format!("\"{arg}\"")
                } else {
                    arg
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(raw: &str) -> Options {
        match parse(raw) {
            Command::Show(options) => options,
            Command::Help => panic!("expected options for {raw:?}"),
        }
    }

    #[test]
    fn tokenizer_groups_quoted_words() {
        assert_eq!(
            tokenize("-t \"Hello World\" -f"),
            vec!["-t", "Hello World", "-f"]
        );
        assert_eq!(tokenize("  a   b  "), vec!["a", "b"]);
        assert_eq!(tokenize("\"\" a"), vec!["a"]);
        assert_eq!(tokenize("x\"y z\"w"), vec!["xy zw"]);
    }

    #[test]
    fn quoted_text_and_follow() {
        let options = show("-t \"Hello World\" -f");
        assert_eq!(options.text, "Hello World");
        assert!(options.follow);
        assert!(!options.block);
    }

    #[test]
    fn help_wins_over_everything() {
        assert_eq!(parse(""), Command::Help);
        assert_eq!(parse("   "), Command::Help);
        assert_eq!(parse("hello -f -h"), Command::Help);
        assert_eq!(parse("--help -t x"), Command::Help);
        assert_eq!(parse_tokens(["", ""]), Command::Help);
    }

    #[test]
    fn defaults() {
        let options = show("hi");
        assert_eq!(
            options,
            Options {
                text: "hi".into(),
                ..Options::default()
            }
        );
        assert_eq!(options.display_ms, 3000);
        assert_eq!(options.ease_out_ms, 1000);
        assert_eq!(options.text_color, Color::WHITE);
        assert_eq!(options.outline_color, Color::BLACK);
    }

    #[test]
    fn last_text_wins() {
        assert_eq!(show("one two").text, "two");
        assert_eq!(show("one -t two three").text, "three");
        assert_eq!(show("one -t two").text, "two");
    }

    #[test]
    fn text_flag_takes_dashed_text() {
        assert_eq!(show("-t -42-").text, "-42-");
    }

    #[test]
    fn durations_are_rounded_milliseconds() {
        let options = show("x -d 0.0017 -e 0.5");
        assert_eq!(options.display_ms, 2);
        assert!(options.ease);
        assert_eq!(options.ease_out_ms, 500);
    }

    #[test]
    fn bad_duration_keeps_default_and_leaves_token() {
        let options = show("-d soon");
        assert_eq!(options.display_ms, DEFAULT_DISPLAY_MS);
        assert_eq!(options.text, "soon");

        let options = show("x -d -f");
        assert_eq!(options.display_ms, DEFAULT_DISPLAY_MS);
        assert!(options.follow);
    }

    #[test]
    fn ease_without_value() {
        let options = show("x -e -b");
        assert!(options.ease);
        assert!(options.block);
        assert_eq!(options.ease_out_ms, DEFAULT_EASE_OUT_MS);
    }

    #[test]
    fn outline_with_and_without_color() {
        let options = show("x -o");
        assert!(options.outline);
        assert_eq!(options.outline_color, Color::BLACK);

        let options = show("x -o #FF00FF -c 0,0,255");
        assert_eq!(options.outline_color, Color::new(255, 0, 254));
        assert_eq!(options.text_color, Color::new(0, 0, 255));
    }

    #[test]
    fn velocity_takes_negative_values() {
        assert_eq!(show("x -v -1.5").velocity, Velocity::new(0.0, 1.5));
        assert_eq!(show("x --velocity 1.0,-1.0").velocity, Velocity::new(1.0, -1.0));
        assert_eq!(show("x -v nope").velocity, Velocity::default());
    }

    #[test]
    fn unknown_flags_are_ignored() {
        let options = show("x --shiny -f");
        assert_eq!(options.text, "x");
        assert!(options.follow);
    }

    #[test]
    fn defaults_serialize_to_text_only() {
        assert_eq!(Options::default().to_args(), vec!["-t", DEFAULT_TEXT]);
    }

    #[test]
    fn command_line_round_trip() {
        let options = Options {
            text: "Hello there".into(),
            follow: true,
            block: true,
            outline: true,
            ease: true,
            ease_out_ms: 2500,
            display_ms: 1234,
            outline_color: Color::new(1, 2, 3),
            text_color: Color::new(255, 0, 254),
            velocity: Velocity::new(0.0, -40.0),
        };

        assert_eq!(show(&options.to_command_line()), options);
        assert_eq!(parse_tokens(options.to_args()), Command::Show(options));
    }
}
