//! HTML page and form handlers.

mod account;
mod stores;

pub use account::{
    forgot_submit, login_page, login_submit, logout_submit, register_submit, reset_page,
    reset_submit,
};
pub use stores::{
    add_store_page, add_store_submit, heart_submit, hearts_page, map_page, review_submit,
    store_page, stores_page, tag_page, tags_page, top_page,
};
