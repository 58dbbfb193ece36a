use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::template::MessageTemplate;

/// Default number of templates held before the cache is cleared.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;
/// Templates longer than this many characters are parsed but never cached.
pub const MAX_CACHED_TEMPLATE_LEN: usize = 1024;

/// Parsed-template cache keyed by template text.
#[derive(Debug)]
pub struct TemplateCache {
	capacity: usize,
	templates: Mutex<HashMap<Box<str>, Arc<MessageTemplate>>>,
}

impl Default for TemplateCache {
	fn default() -> Self {
		Self::with_capacity(DEFAULT_CACHE_CAPACITY)
	}
}

impl TemplateCache {
	/// Cache holding at most `capacity` templates.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			capacity,
			templates: Mutex::new(HashMap::new()),
		}
	}

	/// Cached template for `text`, parsing it on a miss.
	pub fn parse(&self, text: &str) -> Arc<MessageTemplate> {
		if text.chars().count() > MAX_CACHED_TEMPLATE_LEN {
			return Arc::new(MessageTemplate::parse(text));
		}

		let mut templates = self.templates.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(template) = templates.get(text) {
			return Arc::clone(template);
		}

		let template = Arc::new(MessageTemplate::parse(text));
		if templates.len() >= self.capacity {
			templates.clear();
		}
		templates.insert(text.into(), Arc::clone(&template));
		template
	}

	/// Number of cached templates.
	pub fn len(&self) -> usize {
		self.templates.lock().unwrap_or_else(PoisonError::into_inner).len()
	}

	/// Whether nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
