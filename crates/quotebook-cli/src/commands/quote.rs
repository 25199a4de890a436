//! Quote command handlers

use anyhow::Result;

use quotebook_core::{CategoryFilter, QuoteDraft, QuoteStore};

use crate::output::Output;

/// Show the current quote
///
/// Restores the quote shown last in this session, or picks a new one.
pub fn show(store: &mut QuoteStore, category: Option<String>, output: &Output) -> Result<()> {
    let filter = CategoryFilter::parse(category.as_deref());
    let quote = store.current_or_random(&filter);
    output.print_quote(quote.as_ref());
    Ok(())
}

/// Show a new random quote
pub fn next(store: &mut QuoteStore, category: Option<String>, output: &Output) -> Result<()> {
    let filter = CategoryFilter::parse(category.as_deref());
    let quote = store.show_random(&filter);
    output.print_quote(quote.as_ref());
    Ok(())
}

/// Add a quote
pub fn add(store: &mut QuoteStore, text: String, category: String, output: &Output) -> Result<()> {
    let quote = store.add_quote(&QuoteDraft::new(text, category))?;
    output.success(&format!("Added {}", quote));
    Ok(())
}

/// List quotes, optionally restricted to one category
pub fn list(store: &QuoteStore, category: Option<String>, output: &Output) -> Result<()> {
    let filter = CategoryFilter::parse(category.as_deref());
    output.print_quotes(&store.quotes_in(&filter));
    Ok(())
}

/// List categories
pub fn categories(store: &QuoteStore, output: &Output) -> Result<()> {
    output.print_categories(&store.categories());
    Ok(())
}
