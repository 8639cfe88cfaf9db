//! Folio contact
//!
//! Client side of the portfolio contact form:
//!
//! - [`validate`]: pure field validation with every error reported at once
//! - [`ContactForm`]: field values, errors, the submitting guard and the
//!   result banner
//! - [`DeliveryService`]: boundary to the mail service, with an
//!   [`EmailJsClient`] implementation
//! - [`ContactSession`]: async submit over a shared form
//!
//! # Example
//!
//! ```rust
//! use folio_contact::{validate, ContactFields, Field};
//!
//! let fields = ContactFields::new("Ada", "bad", "Hi", "short");
//! let errors = validate(&fields, true);
//! assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![Field::Email, Field::Message]);
//! ```

pub mod delivery;
pub mod error;
pub mod form;
pub mod session;
pub mod validate;

pub use delivery::{
    DeliveryResponse, DeliveryService, EmailJsClient, EmailJsConfig, EmailJsRequest, TemplateParams, STATUS_OK,
};
pub use error::{DeliveryError, Result, SEND_FAILED, UNEXPECTED_ERROR};
pub use form::{ContactForm, SubmitBlocked, SubmitResult, SUCCESS_BANNER};
pub use session::{ContactSession, SubmitOutcome};
pub use validate::{is_valid_email, validate, ContactFields, Field, ValidationErrors, MIN_MESSAGE_LEN};
