//! A few lifetime-free Dioxus wrappers for the Pico.css framework.
//! To use, ensure pico.min.css is linked in the application.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::prelude::*;

/// A centered container for your content.
/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A responsive grid layout. Children are laid out side by side.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

/// A card for grouping related content.
/// Wraps content in an `<article>` element.
#[component]
pub fn Card(children: Element) -> Element {
    rsx! { article { {children} } }
}
