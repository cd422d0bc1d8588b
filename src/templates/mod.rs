//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Every post card on every page goes
//! through [`TemplateRenderer::render_card`].

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{CatalogLoad, PostPage, PostRecord};
use crate::helpers::{display_date, listing_url, post_url};
use crate::listing::{CategoryFilter, PageControl, RenderInstruction};

/// How a post card is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardOptions {
    /// Staggered entrance animation, `index * 0.1s`
    pub animate: bool,
    pub show_read_time: bool,
}

impl CardOptions {
    /// Cards on the listing page
    pub const LISTING: CardOptions = CardOptions {
        animate: true,
        show_read_time: true,
    };

    /// Homepage and related-post cards
    pub const COMPACT: CardOptions = CardOptions {
        animate: false,
        show_read_time: false,
    };
}

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit in the templates; rendered markdown and cards
        // are inserted as-is
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("listing.html", include_str!("site/listing.html")),
            ("post.html", include_str!("site/post.html")),
            ("partials/card.html", include_str!("site/partials/card.html")),
            (
                "partials/pagination.html",
                include_str!("site/partials/pagination.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self {
            tera,
            site: SiteData::from(config),
        })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert(
            "current_year",
            &chrono::Local::now().format("%Y").to_string(),
        );
        context
    }

    /// Render one post card
    pub fn render_card(
        &self,
        post: &PostRecord,
        index: usize,
        options: CardOptions,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("card", &CardData::new(post, index, options, &self.site.post_page));
        self.render("partials/card.html", &context)
    }

    /// Render a grid of cards, in order
    pub fn render_cards(&self, posts: &[PostRecord], options: CardOptions) -> Result<String> {
        posts
            .iter()
            .enumerate()
            .map(|(index, post)| self.render_card(post, index, options))
            .collect::<Result<Vec<_>>>()
            .map(|cards| cards.join("\n"))
    }

    /// Homepage with the latest posts, or the empty message
    pub fn render_home(&self, latest: &CatalogLoad) -> Result<String> {
        let mut context = self.base_context();
        context.insert("description", &self.site.description);
        context.insert("cards", &self.render_cards(&latest.posts, CardOptions::COMPACT)?);
        self.render("home.html", &context)
    }

    /// Listing page for a render instruction
    pub fn render_listing(&self, instruction: &RenderInstruction) -> Result<String> {
        let listing = ListingData {
            cards: self.render_cards(&instruction.view.posts, CardOptions::LISTING)?,
            results_text: instruction.results_text.clone(),
            show_no_results: instruction.show_no_results,
            query: instruction.query.clone(),
            show_clear_search: instruction.show_clear_search,
            clear_search_url: self.listing_link(&instruction.active_category, "", 1),
            active_category: instruction.active_category.to_string(),
            categories: self.category_buttons(instruction),
        };

        let mut context = self.base_context();
        context.insert("listing", &listing);
        context.insert("pagination", &self.pagination_data(instruction));
        self.render("listing.html", &context)
    }

    /// Single-post page, or its not-found / load-error message
    pub fn render_post(&self, page: &PostPage) -> Result<String> {
        let mut context = self.base_context();

        match page {
            PostPage::Found(view) => {
                context.insert("post", view);
                context.insert("description", &view.header.excerpt);
                context.insert(
                    "related_cards",
                    &self.render_cards(&view.related, CardOptions::COMPACT)?,
                );
            }
            _ => {
                context.insert("message", &page.message_html().unwrap_or_default());
            }
        }

        self.render("post.html", &context)
    }

    fn listing_link(&self, category: &CategoryFilter, query: &str, page: usize) -> String {
        let category = (!category.is_all()).then(|| category.as_str());
        listing_url(&self.site.listing_page, category, query, page)
    }

    fn category_buttons(&self, instruction: &RenderInstruction) -> Vec<CategoryButton> {
        std::iter::once(CategoryFilter::All)
            .chain(self.site.categories.iter().map(|c| CategoryFilter::parse(c)))
            .map(|filter| CategoryButton {
                label: match &filter {
                    CategoryFilter::All => "All".to_string(),
                    CategoryFilter::Only(category) => category.to_uppercase(),
                },
                value: filter.to_string(),
                url: self.listing_link(&filter, &instruction.query, 1),
                active: filter == instruction.active_category,
            })
            .collect()
    }

    fn pagination_data(&self, instruction: &RenderInstruction) -> PaginationData {
        let controls = &instruction.pagination;
        let current = instruction.view.current_page;
        let link = |page| self.listing_link(&instruction.active_category, &instruction.query, page);

        PaginationData {
            visible: controls.visible,
            prev_url: controls.prev_enabled.then(|| link(current - 1)),
            next_url: controls.next_enabled.then(|| link(current + 1)),
            pages: controls
                .pages
                .iter()
                .map(|control| match *control {
                    PageControl::Page { number, current } => PageLink {
                        number: Some(number),
                        url: Some(link(number)),
                        current,
                        ellipsis: false,
                    },
                    PageControl::Ellipsis => PageLink {
                        number: None,
                        url: None,
                        current: false,
                        ellipsis: true,
                    },
                })
                .collect(),
        }
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: format a post date
///
/// `LL` gives `January 10, 2025`; anything else leaves the value unchanged.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    if format == "LL" {
        return Ok(tera::Value::String(display_date(&s)));
    }

    Ok(tera::Value::String(s))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub listing_page: String,
    pub post_page: String,
    pub categories: Vec<String>,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            listing_page: config.listing_page.clone(),
            post_page: config.post_page.clone(),
            categories: config.categories.clone(),
        }
    }
}

/// Fields a card template sees
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub id: String,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub date: String,
    pub tags: Vec<String>,
    pub icon: String,
    pub read_time: Option<String>,
    pub animation_delay: Option<String>,
}

impl CardData {
    pub fn new(post: &PostRecord, index: usize, options: CardOptions, post_page: &str) -> Self {
        Self {
            id: post.id.clone(),
            url: post_url(post_page, &post.id),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category.clone(),
            date: post.date.clone(),
            tags: post.tags.clone(),
            icon: post.icon.clone(),
            read_time: post.read_time.clone().filter(|_| options.show_read_time),
            animation_delay: options
                .animate
                .then(|| format!("{:.1}s", index as f64 * 0.1)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingData {
    pub cards: String,
    pub results_text: String,
    pub show_no_results: bool,
    pub query: String,
    pub show_clear_search: bool,
    pub clear_search_url: String,
    pub active_category: String,
    pub categories: Vec<CategoryButton>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryButton {
    pub value: String,
    pub label: String,
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub visible: bool,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub pages: Vec<PageLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub number: Option<usize>,
    pub url: Option<String>,
    pub current: bool,
    pub ellipsis: bool,
}
