use log::{debug, info};
use mdscan_engine::{
    InlineProcessor, ParseOptions, StandardInlineProcessor, Tokenizer, TokenizerError,
    split_lines,
};
use thiserror::Error;

use crate::context::{PluginScanContext, RuleViolation};
use crate::plugin::{RuleDetails, RulePlugin};
use crate::rules;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("unhandled error processing the document: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("no rule with id or name '{id}'")]
    UnknownRule { id: String },
    #[error("a rule with id '{id}' is already registered")]
    DuplicateRule { id: &'static str },
}

struct RegisteredRule {
    plugin: Box<dyn RulePlugin>,
    details: RuleDetails,
    enabled: bool,
}

/// Owns the rule set and scans documents with it.
pub struct PluginManager {
    rules: Vec<RegisteredRule>,
    tokenizer: Tokenizer,
    inline: StandardInlineProcessor,
}

impl PluginManager {
    /// A manager with no rules registered.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            rules: vec![],
            tokenizer: Tokenizer::new(options),
            inline: StandardInlineProcessor,
        }
    }

    /// A manager with every built-in rule registered.
    pub fn with_builtin_rules(options: ParseOptions) -> Self {
        let mut manager = Self::new(options);
        for plugin in rules::builtin_rules() {
            manager.push_rule(plugin);
        }
        manager
    }

    pub fn register(&mut self, plugin: Box<dyn RulePlugin>) -> Result<(), RuleError> {
        let details = plugin.details();
        if self
            .rules
            .iter()
            .any(|r| r.details.matches(details.id) || r.details.matches(details.name))
        {
            return Err(RuleError::DuplicateRule { id: details.id });
        }
        self.push_rule(plugin);
        Ok(())
    }

    fn push_rule(&mut self, plugin: Box<dyn RulePlugin>) {
        let details = plugin.details();
        debug!("Registered rule {} ({})", details.id, details.name);
        self.rules.push(RegisteredRule {
            plugin,
            details,
            enabled: details.enabled_by_default,
        });
    }

    /// Enables then disables rules named by id or name.
    ///
    /// Disabling wins when a rule appears in both lists.
    pub fn apply_configuration(
        &mut self,
        enable: &[String],
        disable: &[String],
    ) -> Result<(), RuleError> {
        for (keys, enabled) in [(enable, true), (disable, false)] {
            for key in keys {
                let rule = self
                    .rules
                    .iter_mut()
                    .find(|r| r.details.matches(key))
                    .ok_or_else(|| RuleError::UnknownRule { id: key.clone() })?;
                rule.enabled = enabled;
            }
        }
        Ok(())
    }

    /// Every registered rule with its enabled state, in registration order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleDetails, bool)> + '_ {
        self.rules.iter().map(|r| (r.details, r.enabled))
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.rules
            .iter()
            .any(|r| r.enabled && r.details.matches(key))
    }

    /// Tokenizes `source` and runs every enabled rule over it.
    pub fn scan_document(&mut self, source: &str) -> Result<Vec<RuleViolation>, RuleError> {
        let document = self.tokenizer.tokenize(source)?;
        let tokens = self.inline.process(&document);
        let (lines, _) = split_lines(source);
        let mut context = PluginScanContext::new(&document, &lines);

        let mut active: Vec<&mut RegisteredRule> =
            self.rules.iter_mut().filter(|r| r.enabled).collect();
        debug!(
            "Scanning {} lines, {} tokens with {} rules",
            lines.len(),
            tokens.len(),
            active.len()
        );

        for rule in active.iter_mut() {
            rule.plugin.starting_new_file();
        }
        for (index, line) in lines.iter().enumerate() {
            context.set_line_number(index + 1);
            for rule in active.iter_mut() {
                context.set_rule(rule.details);
                rule.plugin.next_line(&mut context, line);
            }
        }
        for token in &tokens {
            for rule in active.iter_mut() {
                context.set_rule(rule.details);
                rule.plugin.next_token(&mut context, token);
            }
        }
        for rule in active.iter_mut() {
            context.set_rule(rule.details);
            rule.plugin.completed_file(&mut context);
        }

        let violations = context.into_violations();
        info!("Found {} violations", violations.len());
        Ok(violations)
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::with_builtin_rules(ParseOptions::default())
    }
}
