//! Long option registry and dispatcher.
//!
//! Options are registered up front with a callback each, then [`Options::parse`]
//! walks the argument list left to right and calls the matching callback for
//! every token. Tokens not starting with `--` go to the positional handler.
//!
//! Matching is a linear scan in registration order and the first match wins.
//! With the default [`MatchPolicy::Prefix`] a descriptor matches any token whose
//! text after `--` *starts with* its name, so registering `out` before `output`
//! makes `--output=x` resolve to `out`. Use [`MatchPolicy::Exact`] to opt out.
//!
//! Callbacks that already ran are not undone when a later token fails.

use tracing::{debug, trace};

use crate::errors::ParseError;

const PREFIX: &str = "--";
const SEPARATOR: char = '=';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    /// `--name`, takes no value
    Flag,
    /// `--name=value`
    Value,
}

/// How the text after `--` is compared against registered names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// The token only has to start with the option name
    #[default]
    Prefix,
    /// The token must be `--name`, or `--name=...` for value options
    Exact,
}

enum Callback<'a> {
    Flag(Box<dyn FnMut() + 'a>),
    Value(Box<dyn FnMut(&str) + 'a>),
}

pub struct Opt<'a> {
    /// Argument, without the leading `--`
    name: String,
    fun: Callback<'a>,
}

impl<'a> Opt<'a> {
    fn new(name: String, fun: Callback<'a>) -> Self {
        assert!(!name.is_empty(), "option name must not be empty");
        assert!(
            !name.contains(SEPARATOR),
            "option name '{name}' must not contain '{SEPARATOR}'"
        );
        Opt { name, fun }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OptKind {
        match self.fun {
            Callback::Flag(_) => OptKind::Flag,
            Callback::Value(_) => OptKind::Value,
        }
    }

    /// `body` is the token with the `--` already stripped
    fn matches(&self, body: &str, policy: MatchPolicy) -> bool {
        let Some(rest) = body.strip_prefix(self.name.as_str()) else {
            return false;
        };
        match (policy, self.kind()) {
            (MatchPolicy::Prefix, _) => true,
            (MatchPolicy::Exact, OptKind::Flag) => rest.is_empty(),
            (MatchPolicy::Exact, OptKind::Value) => {
                rest.is_empty() || rest.starts_with(SEPARATOR)
            }
        }
    }

    fn dispatch(&mut self, body: &str) -> Result<(), ParseError> {
        let rest = &body[self.name.len()..];
        match &mut self.fun {
            Callback::Flag(fun) => {
                debug!(option = %self.name, "flag");
                fun();
                Ok(())
            }
            Callback::Value(fun) => {
                let Some(value) = rest.strip_prefix(SEPARATOR) else {
                    return Err(ParseError::MalformedValueOption(self.name.clone()));
                };
                debug!(option = %self.name, value, "value option");
                fun(value);
                Ok(())
            }
        }
    }
}

/// Registry of long options plus an optional positional handler.
///
/// Callbacks may borrow from the caller for `'a`, typically disjoint fields
/// of a configuration struct that is read back once the registry is dropped.
#[derive(Default)]
pub struct Options<'a> {
    opts: Vec<Opt<'a>>,
    positional: Option<Box<dyn FnMut(&str) + 'a>>,
    policy: MatchPolicy,
}

impl<'a> Options<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Options {
            policy,
            ..Self::default()
        }
    }

    /// Register `--name`.
    ///
    /// # Panics
    ///
    /// If `name` is empty or contains `=`.
    pub fn register_flag(&mut self, name: impl Into<String>, fun: impl FnMut() + 'a) -> &mut Self {
        self.opts
            .push(Opt::new(name.into(), Callback::Flag(Box::new(fun))));
        self
    }

    /// Register `--name=<value>`. The callback receives the raw value, which may
    /// be empty or contain further `=`.
    ///
    /// # Panics
    ///
    /// If `name` is empty or contains `=`.
    pub fn register_value_option(
        &mut self,
        name: impl Into<String>,
        fun: impl FnMut(&str) + 'a,
    ) -> &mut Self {
        self.opts
            .push(Opt::new(name.into(), Callback::Value(Box::new(fun))));
        self
    }

    /// Handler for tokens that don't start with `--`. Replaces any earlier one.
    pub fn register_positional(&mut self, fun: impl FnMut(&str) + 'a) -> &mut Self {
        self.positional = Some(Box::new(fun));
        self
    }

    /// Registered options, in registration (and matching) order
    pub fn options(&self) -> impl Iterator<Item = &Opt<'a>> + '_ {
        self.opts.iter()
    }

    pub fn has_positional(&self) -> bool {
        self.positional.is_some()
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns true if every token was dispatched.
    pub fn parse<I, S>(&mut self, tokens: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_parse(tokens).is_ok()
    }

    /// Like [`Options::parse`], but reports the token that stopped the scan.
    pub fn try_parse<I, S>(&mut self, tokens: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if let Err(err) = self.parse_one(token) {
                debug!(token, %err, "parse stopped");
                return Err(err);
            }
        }
        Ok(())
    }

    fn parse_one(&mut self, token: &str) -> Result<(), ParseError> {
        let Some(body) = token.strip_prefix(PREFIX) else {
            return match &mut self.positional {
                Some(fun) => {
                    trace!(token, "positional");
                    fun(token);
                    Ok(())
                }
                None => Err(ParseError::UnhandledPositional(token.to_owned())),
            };
        };
        let policy = self.policy;
        match self.opts.iter_mut().find(|opt| opt.matches(body, policy)) {
            Some(opt) => opt.dispatch(body),
            None => Err(ParseError::UnknownOption(token.to_owned())),
        }
    }
}
