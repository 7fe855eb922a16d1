//! Binding of option descriptors to a per-invocation flag set.
//!
//! The flag set is a fresh `clap::Command` built for one run. Command-line
//! tokens use single-dash flag names (`-name value`, `-name=value`); they are
//! rewritten to clap's long form before matching, and flag scanning stops at
//! the first non-flag token or at `--`.

use std::collections::{HashMap, HashSet};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::error::{ConfigurationError, ParseError};
use crate::option::{Kind, OptionDescriptor, Storage, Value};

const REST_ID: &str = "__flagcmd_rest";

struct BoundFlag {
    flag: String,
    kind: Kind,
    storage: Storage,
}

/// Flags bound for a single invocation.
pub struct FlagSet {
    command: Command,
    flags: Vec<BoundFlag>,
}

/// Result of parsing an argument slice into the bound storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Flags that appeared on the command line, in binding order.
    pub set_flags: Vec<String>,
    /// Tokens left after flag scanning stopped.
    pub rest: Vec<String>,
}

/// Validate every option against its declared tag and bind them to a fresh
/// flag set named `name`.
///
/// Validation runs over all options before anything is bound, so a
/// configuration error leaves every storage cell untouched. Once validated,
/// each storage cell is reset to its option's default.
pub fn bind(name: &str, options: &[OptionDescriptor]) -> Result<FlagSet, ConfigurationError> {
    let mut seen = HashSet::new();
    let mut kinds = Vec::with_capacity(options.len());
    for opt in options {
        let kind = validate(opt)?;
        if !seen.insert(opt.flag.as_str()) {
            return Err(ConfigurationError::DuplicateFlag(opt.flag.clone()));
        }
        kinds.push(kind);
    }

    let mut command = Command::new(name.to_string())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .arg(
            Arg::new(REST_ID)
                .num_args(1..)
                .action(ArgAction::Append)
                .hide(true),
        );
    let mut flags = Vec::with_capacity(options.len());
    for (opt, kind) in options.iter().zip(kinds) {
        opt.storage.store(opt.default.clone());
        command = command.arg(flag_arg(&opt.flag, kind, &opt.usage));
        tracing::debug!(flag = %opt.flag, kind = %kind, "bound flag");
        flags.push(BoundFlag {
            flag: opt.flag.clone(),
            kind,
            storage: opt.storage.clone(),
        });
    }

    Ok(FlagSet { command, flags })
}

fn validate(opt: &OptionDescriptor) -> Result<Kind, ConfigurationError> {
    if !valid_flag_name(&opt.flag) {
        return Err(ConfigurationError::InvalidFlagName(opt.flag.clone()));
    }
    let tag = opt.type_tag.to_lowercase();
    let Some(kind) = Kind::from_tag(&tag) else {
        return Err(ConfigurationError::UnsupportedType {
            flag: opt.flag.clone(),
            tag,
        });
    };
    if opt.storage.kind() != kind {
        return Err(ConfigurationError::StorageMismatch {
            flag: opt.flag.clone(),
            expected: kind,
            actual: opt.storage.kind(),
        });
    }
    if opt.default.kind() != kind {
        return Err(ConfigurationError::DefaultMismatch {
            flag: opt.flag.clone(),
            expected: kind,
            actual: opt.default.kind(),
        });
    }
    Ok(kind)
}

fn valid_flag_name(flag: &str) -> bool {
    !flag.is_empty()
        && flag != REST_ID
        && !flag.starts_with('-')
        && !flag.contains('=')
        && !flag.chars().any(char::is_whitespace)
}

fn flag_arg(flag: &str, kind: Kind, usage: &str) -> Arg {
    let arg = Arg::new(flag.to_string())
        .long(flag.to_string())
        .help(usage.to_string())
        .action(ArgAction::Set);
    let value = |arg: Arg| arg.num_args(1).allow_hyphen_values(true);
    match kind {
        Kind::Bool => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .value_parser(parse_bool),
        Kind::String => value(arg).value_parser(value_parser!(String)),
        Kind::Int => value(arg).value_parser(parse_int::<isize>),
        Kind::Int64 => value(arg).value_parser(parse_int::<i64>),
        Kind::Uint => value(arg).value_parser(parse_int::<usize>),
        Kind::Uint64 => value(arg).value_parser(parse_int::<u64>),
        Kind::Float64 => value(arg).value_parser(value_parser!(f64)),
    }
}

/// Integer literal with an optional sign and a base prefix (`0x`, `0o`, `0b`,
/// or a leading `0` for octal). Underscores may separate digits.
fn parse_int<T: TryFrom<i128>>(s: &str) -> Result<T, String> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(d) = lower.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = lower.strip_prefix("0b") {
        (2, d)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    let digits = digits.strip_prefix('_').filter(|_| radix != 10).unwrap_or(digits);
    if digits.is_empty()
        || digits.starts_with(|c| matches!(c, '_' | '+' | '-'))
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(format!("invalid integer `{s}`"));
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = u128::from_str_radix(&cleaned, radix)
        .map_err(|e| format!("invalid integer `{s}`: {e}"))?;
    let magnitude = i128::try_from(magnitude).map_err(|_| format!("value out of range: `{s}`"))?;
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| format!("value out of range: `{s}`"))
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(format!("invalid boolean `{s}`")),
    }
}

impl FlagSet {
    pub fn flags(&self) -> impl Iterator<Item = (&str, Kind)> {
        self.flags.iter().map(|f| (f.flag.as_str(), f.kind))
    }

    /// Parse `args` (option tokens only, no command name) and write every
    /// flag that is present into its storage.
    pub fn parse<I, S>(self, args: I) -> Result<Parsed, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kinds: HashMap<&str, Kind> = self.flags().collect();
        let Some(tokens) = normalize(args.into_iter().map(Into::into), &kinds) else {
            let mut command = self.command;
            return Err(ParseError::HelpRequested(command.render_help().to_string()));
        };
        let matches = self.command.try_get_matches_from(tokens)?;

        let mut parsed = Parsed::default();
        for bound in &self.flags {
            if let Some(value) = read(&matches, bound)? {
                bound.storage.store(value);
                parsed.set_flags.push(bound.flag.clone());
            }
        }
        parsed.rest = matches
            .get_many::<String>(REST_ID)
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();
        Ok(parsed)
    }
}

fn read(matches: &ArgMatches, bound: &BoundFlag) -> Result<Option<Value>, ParseError> {
    let id = bound.flag.as_str();
    let wrap = |source| ParseError::Matches {
        flag: bound.flag.clone(),
        source,
    };
    let value = match bound.kind {
        Kind::String => matches
            .try_get_one::<String>(id)
            .map_err(wrap)?
            .cloned()
            .map(Value::String),
        Kind::Int => matches.try_get_one::<isize>(id).map_err(wrap)?.map(|v| Value::Int(*v)),
        Kind::Int64 => matches.try_get_one::<i64>(id).map_err(wrap)?.map(|v| Value::Int64(*v)),
        Kind::Uint => matches.try_get_one::<usize>(id).map_err(wrap)?.map(|v| Value::Uint(*v)),
        Kind::Uint64 => matches.try_get_one::<u64>(id).map_err(wrap)?.map(|v| Value::Uint64(*v)),
        Kind::Float64 => matches.try_get_one::<f64>(id).map_err(wrap)?.map(|v| Value::Float64(*v)),
        Kind::Bool => matches.try_get_one::<bool>(id).map_err(wrap)?.map(|v| Value::Bool(*v)),
    };
    Ok(value)
}

/// Rewrite single-dash flags to clap's `--name` form and fence off the
/// positional tail with `--`. Returns `None` when `-h`/`-help` is given and
/// no option of that name exists.
fn normalize(
    mut args: impl Iterator<Item = String>,
    kinds: &HashMap<&str, Kind>,
) -> Option<Vec<String>> {
    let mut out = Vec::new();
    while let Some(tok) = args.next() {
        if tok == "--" || !tok.starts_with('-') || tok == "-" {
            out.push("--".to_string());
            if tok != "--" {
                out.push(tok);
            }
            out.extend(args.by_ref());
            break;
        }
        let body = tok.strip_prefix("--").unwrap_or(&tok[1..]).to_string();
        if matches!(body.as_str(), "h" | "help") && !kinds.contains_key(body.as_str()) {
            return None;
        }
        let takes_value = match body.split_once('=') {
            Some(_) => false,
            None => kinds.get(body.as_str()).is_some_and(|k| *k != Kind::Bool),
        };
        out.push(format!("--{body}"));
        if takes_value {
            if let Some(value) = args.next() {
                out.push(value);
            }
        }
    }
    Some(out)
}
