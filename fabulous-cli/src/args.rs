//! Minimal argument parsing: positionals plus `--flag` / `--option VALUE`.

use std::collections::BTreeMap;

use anyhow::{Context, anyhow, bail};

/// Options that take a value.
const VALUE_OPTIONS: &[&str] = &["page", "filter", "sort", "expiring", "limit", "type"];
/// Options that are plain switches.
const SWITCHES: &[&str] = &["json"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<String>,
    options: BTreeMap<String, String>,
    switches: Vec<String>,
}

impl Args {
    pub fn parse<I, S>(raw: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Self::default();
        let mut iter = raw.into_iter().map(|s| -> String { s.into() });
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                args.positional.push(arg);
                continue;
            };
            let (name, inline) = match name.split_once('=') {
                Some((n, v)) => (n.to_string(), Some(v.to_string())),
                None => (name.to_string(), None),
            };
            if SWITCHES.contains(&name.as_str()) {
                args.switches.push(name);
            } else if VALUE_OPTIONS.contains(&name.as_str()) {
                let value = match inline {
                    Some(v) => v,
                    None => iter
                        .next()
                        .ok_or_else(|| anyhow!("--{name} requires a value"))?,
                };
                args.options.insert(name, value);
            } else {
                bail!("Unknown option: --{name}");
            }
        }
        Ok(args)
    }

    /// Remove and return the first positional argument.
    pub fn shift(&mut self) -> Option<String> {
        if self.positional.is_empty() {
            None
        } else {
            Some(self.positional.remove(0))
        }
    }

    /// Like [`shift`](Self::shift) but required; `what` names it in the error.
    pub fn require(&mut self, what: &str) -> anyhow::Result<String> {
        self.shift().ok_or_else(|| anyhow!("Missing argument: {what}"))
    }

    /// Every positional argument not consumed yet.
    pub fn rest(&mut self) -> Vec<String> {
        std::mem::take(&mut self.positional)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s == name)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn number<T>(&self, name: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.option(name)
            .map(|raw| {
                raw.parse::<T>()
                    .with_context(|| format!("--{name} expects a number, got '{raw}'"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positionals_and_options_mix() {
        let mut args =
            Args::parse(["list", "--sort", "expiry", "--json", "--limit=5", "extra"]).unwrap();
        assert_eq!(args.shift().as_deref(), Some("list"));
        assert_eq!(args.option("sort"), Some("expiry"));
        assert!(args.flag("json"));
        assert_eq!(args.number::<usize>("limit").unwrap(), Some(5));
        assert_eq!(args.rest(), ["extra"]);
        assert!(args.shift().is_none());
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = Args::parse(["list", "--page"]).unwrap_err();
        assert_eq!(err.to_string(), "--page requires a value");
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(Args::parse(["--verbose"]).is_err());
    }

    #[test]
    fn bad_number_is_reported() {
        let args = Args::parse(["--expiring", "soon"]).unwrap();
        let err = args.number::<u32>("expiring").unwrap_err();
        assert!(err.to_string().contains("--expiring"));
    }

    #[test]
    fn require_names_the_missing_argument() {
        let mut args = Args::parse(Vec::<String>::new()).unwrap();
        assert_eq!(
            args.require("DOMAIN").unwrap_err().to_string(),
            "Missing argument: DOMAIN"
        );
    }
}
