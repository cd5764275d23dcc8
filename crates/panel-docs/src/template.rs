//! Placeholder templates.
//!
//! A template is parsed once into literal text, `{{token}}` placeholders and
//! optional named sections. Rendering replaces every placeholder occurrence
//! and drops any section the context has not enabled. There is no escaping
//! syntax: braces that do not form a valid placeholder stay literal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::SubstitutionContext;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)?)\}\}").unwrap());

pub const SECOND_INTERVIEW: &str = "secondInterview";

/// An optional block delimited by sentinel text. Both sentinels belong to
/// the section and disappear with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRule {
    pub name: String,
    pub start: String,
    pub end: String,
}

impl SectionRule {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// The "INTERVIEW B" block of candidate letters.
    pub fn second_interview() -> Self {
        Self::new(
            SECOND_INTERVIEW,
            "INTERVIEW B",
            "Biography: {{2ndotherAdviser.biography}}",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Placeholder(String),
    Section { name: String, children: Vec<Node> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse with the built-in section rules.
    pub fn parse(source: &str) -> Self {
        Self::parse_with(source, &[SectionRule::second_interview()])
    }

    pub fn parse_with(source: &str, rules: &[SectionRule]) -> Self {
        let mut nodes = Vec::new();
        let mut cursor = 0;

        while let Some((rule, start, end)) = next_section(source, cursor, rules) {
            parse_flat(&source[cursor..start], &mut nodes);
            let mut children = Vec::new();
            parse_flat(&source[start..end], &mut children);
            nodes.push(Node::Section {
                name: rule.name.clone(),
                children,
            });
            cursor = end;
        }
        parse_flat(&source[cursor..], &mut nodes);

        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Distinct placeholder tokens, in first-seen order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        collect_placeholders(&self.nodes, &mut seen);
        seen
    }

    pub fn render(&self, ctx: &SubstitutionContext) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, ctx, &mut out);
        out
    }

    /// Placeholders the context has no non-empty value for, ignoring
    /// sections that will be dropped.
    pub fn unresolved<'a>(&'a self, ctx: &SubstitutionContext) -> Vec<&'a str> {
        let mut missing = Vec::new();
        collect_unresolved(&self.nodes, ctx, &mut missing);
        missing
    }
}

/// Parse and render in one step.
pub fn render(source: &str, ctx: &SubstitutionContext) -> String {
    Template::parse(source).render(ctx)
}

/// Earliest complete section at or after `from`: (rule, start, end).
fn next_section<'r>(
    source: &str,
    from: usize,
    rules: &'r [SectionRule],
) -> Option<(&'r SectionRule, usize, usize)> {
    rules
        .iter()
        .filter(|rule| !rule.start.is_empty() && !rule.end.is_empty())
        .filter_map(|rule| {
            let start = from + source[from..].find(&rule.start)?;
            let after_start = start + rule.start.len();
            let end = after_start + source[after_start..].find(&rule.end)? + rule.end.len();
            Some((rule, start, end))
        })
        .min_by_key(|(_, start, _)| *start)
}

fn parse_flat(source: &str, nodes: &mut Vec<Node>) {
    let mut last = 0;
    for cap in PLACEHOLDER_RE.captures_iter(source) {
        let whole = cap.get(0).map(|m| m.range()).unwrap_or(0..0);
        if whole.start > last {
            nodes.push(Node::Text(source[last..whole.start].to_string()));
        }
        nodes.push(Node::Placeholder(cap[1].to_string()));
        last = whole.end;
    }
    if last < source.len() {
        nodes.push(Node::Text(source[last..].to_string()));
    }
}

fn render_nodes(nodes: &[Node], ctx: &SubstitutionContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Placeholder(token) => out.push_str(ctx.resolve(token)),
            Node::Section { name, children } => {
                if ctx.section_enabled(name) {
                    render_nodes(children, ctx, out);
                }
            }
        }
    }
}

fn collect_placeholders<'a>(nodes: &'a [Node], seen: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            Node::Placeholder(token) => {
                if !seen.contains(&token.as_str()) {
                    seen.push(token);
                }
            }
            Node::Section { children, .. } => collect_placeholders(children, seen),
            Node::Text(_) => {}
        }
    }
}

fn collect_unresolved<'a>(nodes: &'a [Node], ctx: &SubstitutionContext, missing: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            Node::Placeholder(token) => {
                let empty = ctx.get(token).map_or(true, str::is_empty);
                if empty && !missing.contains(&token.as_str()) {
                    missing.push(token);
                }
            }
            Node::Section { name, children } if ctx.section_enabled(name) => {
                collect_unresolved(children, ctx, missing)
            }
            _ => {}
        }
    }
}
