//! Path templates with named parameters, e.g. `/pet/{id}`.

use crate::error::{DomainError, DomainResult};

/// A request path containing `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Wraps a template string.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitutes every `{name}` with the matching parameter value.
    ///
    /// A `{` without a closing `}` is kept literally.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingPathParameter`] if a placeholder has no
    /// matching entry in `params`.
    pub fn render(&self, params: &[(&str, &str)]) -> DomainResult<String> {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return Ok(out);
            };
            let name = &after[..close];
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| DomainError::MissingPathParameter(name.to_string()))?;
            out.push_str(value);
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_single_parameter() {
        let path = PathTemplate::new("/pet/{id}");
        assert_eq!(path.render(&[("id", "123456789")]).unwrap(), "/pet/123456789");
    }

    #[test]
    fn test_render_without_placeholders() {
        let path = PathTemplate::new("/pet/findByStatus");
        assert_eq!(path.render(&[]).unwrap(), "/pet/findByStatus");
    }

    #[test]
    fn test_render_multiple_parameters() {
        let path = PathTemplate::new("/store/{store}/pet/{id}/photos");
        assert_eq!(
            path.render(&[("id", "7"), ("store", "north")]).unwrap(),
            "/store/north/pet/7/photos"
        );
    }

    #[test]
    fn test_missing_parameter() {
        let path = PathTemplate::new("/pet/{id}");
        assert_eq!(
            path.render(&[("name", "rex")]),
            Err(DomainError::MissingPathParameter("id".to_string()))
        );
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let path = PathTemplate::new("/pet/{id");
        assert_eq!(path.render(&[]).unwrap(), "/pet/{id");
    }
}
