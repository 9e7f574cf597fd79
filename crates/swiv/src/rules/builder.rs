// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Ordered first-match rule tables.
//!
//! A table is assembled with `when(..).or(..).then(..)` triples and closed with
//! `otherwise(..)`. The builder states are separate types, so `or` without a
//! preceding `when`, or `build` without `otherwise`, does not compile.

use super::resolve::Resolve;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

pub type Predicate<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;
pub type Action<V> = Arc<dyn Fn(&V) -> Resolve + Send + Sync>;

struct Rule<V> {
    predicates: Vec<Predicate<V>>,
    action: Action<V>,
}

impl<V> Clone for Rule<V> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            action: Arc::clone(&self.action),
        }
    }
}

impl<V> Rule<V> {
    fn matches(&self, variables: &V) -> Option<usize> {
        self.predicates.iter().position(|p| p(variables))
    }
}

/// Builder ready to accept the next rule or the fallback.
pub struct RulesEvaluatorBuilder<V> {
    rules: Vec<Rule<V>>,
}

impl<V> Clone for RulesEvaluatorBuilder<V> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<V> Default for RulesEvaluatorBuilder<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> RulesEvaluatorBuilder<V> {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn when<P>(self, predicate: P) -> PartialRule<V>
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        PartialRule {
            rules: self.rules,
            predicates: vec![Arc::new(predicate)],
        }
    }

    pub fn otherwise<A>(self, action: A) -> CompleteRules<V>
    where
        A: Fn(&V) -> Resolve + Send + Sync + 'static,
    {
        CompleteRules {
            rules: self.rules,
            fallback: Arc::new(action),
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// A rule with at least one predicate, waiting for its action.
pub struct PartialRule<V> {
    rules: Vec<Rule<V>>,
    predicates: Vec<Predicate<V>>,
}

impl<V> Clone for PartialRule<V> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            predicates: self.predicates.clone(),
        }
    }
}

impl<V> PartialRule<V> {
    pub fn or<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    pub fn then<A>(mut self, action: A) -> RulesEvaluatorBuilder<V>
    where
        A: Fn(&V) -> Resolve + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            predicates: self.predicates,
            action: Arc::new(action),
        });
        RulesEvaluatorBuilder { rules: self.rules }
    }
}

/// All rules plus the fallback; only this state can be built.
pub struct CompleteRules<V> {
    rules: Vec<Rule<V>>,
    fallback: Action<V>,
}

impl<V> CompleteRules<V> {
    pub fn build(self) -> RulesEvaluator<V> {
        RulesEvaluator {
            rules: self.rules.into(),
            fallback: self.fallback,
        }
    }
}

pub struct RulesEvaluator<V> {
    rules: Arc<[Rule<V>]>,
    fallback: Action<V>,
}

impl<V> Clone for RulesEvaluator<V> {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
            fallback: Arc::clone(&self.fallback),
        }
    }
}

impl<V> fmt::Debug for RulesEvaluator<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesEvaluator")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<V> RulesEvaluator<V> {
    /// Runs the first rule with a matching predicate, or the fallback.
    pub fn evaluate(&self, variables: &V) -> Resolve {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(predicate) = rule.matches(variables) {
                trace!(rule = index, predicate, "rule matched");
                return (rule.action)(variables);
            }
        }
        trace!(rules = self.rules.len(), "no rule matched, using fallback");
        (self.fallback)(variables)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
