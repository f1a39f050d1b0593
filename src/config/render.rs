//! `[render]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[render]` section in renderall.toml - template evaluation settings.
///
/// # Example
/// ```toml
/// [render]
/// strict = true   # `{{ missing }}` fails the template instead of rendering ""
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Undefined variables are template errors.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub strict: bool,
}
