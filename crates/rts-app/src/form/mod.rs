//! Order form view-models and rendering
//!
//! [`FormView`] is built once from the normalized orders and then edited in
//! place by the front end (egui or the CLI edits file). [`render_html`]
//! turns the same view-model into a static HTML page.

mod html;
mod view;

pub use html::{escape_html, render_html};
pub use view::{
    EmptyNotice, FormOptions, FormView, OrderEdits, OrderGroup, SelectField, SelectOption,
    COMMENT_MAX_CHARS, UNKNOWN_ORDER_ID,
};

use rts_domain::model::Order;

/// Build the form for a batch of normalized orders
pub fn build_form(orders: &[Order], options: &FormOptions) -> FormView {
    FormView::build(orders, options)
}
