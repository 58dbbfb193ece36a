mod binder;
mod cache;
mod capture;
mod convert;
mod culture;
mod datetime;
mod error;
mod message;
mod number;
mod parser;
mod render;
mod scalar;
mod token;
mod value;

/// Placeholder binding.
pub use binder::PropertyBinder;
/// Parsed-template cache.
pub use cache::{DEFAULT_CACHE_CAPACITY, MAX_CACHED_TEMPLATE_LEN, TemplateCache};
/// Capture surface for runtime values.
pub use capture::{Capture, KeyType, Kind, Member, MemberValue, short_type_name};
/// Conversion engine, options, and policy traits.
pub use convert::{
	CaptureOptions, Converter, ConverterBuilder, DestructuringPolicy, MAX_CAPTURED_BYTES, PropertyValueFactory, ScalarConversionPolicy,
};
/// Culture tables and format provider traits.
pub use culture::{Culture, CustomFormatter, DateTimeFormat, FormatProvider, NumberFormat};
/// Error and result aliases.
pub use error::{AccessError, Result, TemplateError};
/// Template type and one-call entry points.
pub use message::{BindingMode, MessageTemplate, capture, format, parse, render};
/// Template scanner.
pub use parser::tokenize;
/// Scalar payloads.
pub use scalar::Scalar;
/// Template token model.
pub use token::{Alignment, AlignmentDirection, Destructuring, PropertyToken, TextToken, Token};
/// Structured value model.
pub use value::{DictionaryValue, Property, PropertyList, PropertyMap, StructureValue, Value};
