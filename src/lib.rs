//! # voucher-printer
//!
//! Turns accounting-export voucher XML into ESC/POS print jobs for
//! thermal receipt printers.
//!
//! ## Scope
//!
//! This crate handles the document pipeline only:
//! - Voucher XML normalization into an [`OrderDocument`]
//! - Fixed-width line layout (item table, wrapping, separators)
//! - ESC/POS command building, including logo rasterization
//!
//! Acquiring the file, persisting user settings and driving the USB
//! transport stay in application code; the crate hands back one
//! finished byte buffer per print job.
//!
//! ## Example
//!
//! ```ignore
//! use voucher_printer::{PrintSettings, VoucherRenderer, extract};
//!
//! let doc = extract(&xml_text)?;
//! let settings = PrintSettings::default();
//! let job = VoucherRenderer::new(&doc, &settings).render().await;
//! // hand `job` to the transport, once per copy
//! ```

mod document;
mod encoding;
mod error;
mod escpos;
mod extract;
mod layout;
mod render;
mod settings;

#[cfg(feature = "image")]
mod raster;

// Re-exports
pub use document::{CompanyInfo, Heading, OrderDocument, OrderInfo, OrderItem, PartyInfo, Totals};
pub use encoding::{encode_printer_text, printer_width};
pub use error::{ExtractError, ExtractResult};
pub use escpos::EscPosBuilder;
pub use extract::extract;
pub use render::VoucherRenderer;
pub use settings::{Align, ColumnPlan, PrintSettings};

#[cfg(feature = "image")]
pub use raster::{MonoBitmap, load_logo, rasterize};
