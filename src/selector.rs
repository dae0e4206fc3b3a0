use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if self.tag.is_none() && self.classes.is_empty() {
            self.id.as_deref()
        } else {
            None
        }
    }

    fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        let Some(element) = dom.element(node_id) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class_name| has_class(element, class_name))
    }
}

/// Descendant-combinator chains of compound `tag#id.class` steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    steps: Vec<SelectorStep>,
}

impl Selector {
    pub(crate) fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::UnsupportedSelector(selector.into()));
        }
        let steps = trimmed
            .split_whitespace()
            .map(|token| {
                parse_selector_step(token)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub(crate) fn query_all(&self, dom: &Dom, scope: NodeId) -> Vec<NodeId> {
        if self.steps.len() == 1 {
            if let Some(id) = self.steps[0].id_only() {
                return dom
                    .by_id(id)
                    .filter(|node| *node == scope || is_inclusive_descendant(dom, *node, scope))
                    .into_iter()
                    .collect();
            }
        }

        let mut candidates = Vec::new();
        dom.collect_elements_descendants_dfs(scope, &mut candidates);
        candidates
            .into_iter()
            .filter(|candidate| self.matches_chain(dom, *candidate, scope))
            .collect()
    }

    pub(crate) fn query_first(&self, dom: &Dom, scope: NodeId) -> Option<NodeId> {
        self.query_all(dom, scope).into_iter().next()
    }

    fn matches_chain(&self, dom: &Dom, node_id: NodeId, scope: NodeId) -> bool {
        let Some((last, ancestors)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(dom, node_id) {
            return false;
        }
        let mut cursor = dom.parent(node_id);
        for step in ancestors.iter().rev() {
            loop {
                let Some(current) = cursor else {
                    return false;
                };
                if current == scope && scope != dom.root {
                    return false;
                }
                cursor = dom.parent(current);
                if step.matches(dom, current) {
                    break;
                }
            }
        }
        true
    }
}

fn is_inclusive_descendant(dom: &Dom, node_id: NodeId, ancestor: NodeId) -> bool {
    let mut cursor = Some(node_id);
    while let Some(current) = cursor {
        if current == ancestor {
            return true;
        }
        cursor = dom.parent(current);
    }
    false
}

fn parse_selector_step(token: &str) -> Option<SelectorStep> {
    let mut step = SelectorStep::default();
    let mut rest = token;

    let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
    if tag_end > 0 {
        let tag = &rest[..tag_end];
        if !tag.chars().all(is_ident_char) {
            return None;
        }
        step.tag = Some(tag.to_ascii_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() || !name.chars().all(is_ident_char) {
            return None;
        }
        match marker {
            '#' if step.id.is_none() => step.id = Some(name.to_string()),
            '.' => step.classes.push(name.to_string()),
            _ => return None,
        }
        rest = &body[end..];
    }

    Some(step)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}
