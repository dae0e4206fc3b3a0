use super::*;

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.text_content(target);
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.value(target);
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    /// Asserts presence (`expected == true`) or absence of a class.
    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.class_contains(target, class_name);
        if actual != expected {
            let describe = |present: bool| {
                if present {
                    format!("class {class_name} present")
                } else {
                    format!("class {class_name} absent")
                }
            };
            return Err(self.assertion_failed(
                selector,
                target,
                &describe(expected),
                describe(actual),
            ));
        }
        Ok(())
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.document.dom.style_get(target, property);
        if actual != expected {
            return Err(self.assertion_failed(selector, target, expected, actual));
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.class_contains(target, class_name))
    }

    pub fn class_list(&self, selector: &str) -> Result<Vec<String>> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.class_list(target))
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.value(target))
    }

    /// Inline style value of `property`, empty when unset.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.style_get(target, property))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.attr(target, name))
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        let selector = Selector::parse(selector)?;
        Ok(selector
            .query_all(&self.document.dom, self.document.dom.root)
            .len())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.document.dom.dump_node(target))
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        let dom = &self.document.dom;
        Selector::parse(selector)?
            .query_first(dom, dom.root)
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn assertion_failed(
        &self,
        selector: &str,
        target: NodeId,
        expected: &str,
        actual: String,
    ) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: truncate_chars(&self.document.dom.dump_node(target), 200),
        }
    }
}
