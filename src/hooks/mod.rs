//! Hook dispatch for the render pipeline and the admin surface.
//!
//! Callbacks are registered per [`Stage`] with an integer priority. Lower
//! priorities run first; equal priorities run in registration order.
//!
//! # Stages
//!
//! | Stage                | Callback shape                         | Surface  |
//! |----------------------|----------------------------------------|----------|
//! | `Title`              | `(ctx, title) -> title`                | both     |
//! | `DocumentTitleParts` | `(ctx, parts) -> parts`                | both     |
//! | `Head`               | `(ctx, &mut out)`                      | both     |
//! | `AdminMenu`          | [`MenuPage`] records                   | admin    |
//! | `AdminInit`          | [`SettingsRegistration`] records       | admin    |
//! | `AddMetaBoxes`       | [`MetaBox`] records                    | admin    |
//! | `SaveItem`           | `(request) -> outcome`                 | admin    |

pub mod admin;
pub mod render;

pub use admin::{MenuPage, MetaBox, SaveOutcome, SaveRequest, SettingsRegistration};
pub use render::{RenderContext, TitleParts};

use crate::debug;

/// Points in the host lifecycle callbacks attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Title,
    DocumentTitleParts,
    Head,
    AdminMenu,
    AdminInit,
    AddMetaBoxes,
    SaveItem,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Title,
        Stage::DocumentTitleParts,
        Stage::Head,
        Stage::AdminMenu,
        Stage::AdminInit,
        Stage::AddMetaBoxes,
        Stage::SaveItem,
    ];

    /// Host-side hook name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "wp_title",
            Self::DocumentTitleParts => "document_title_parts",
            Self::Head => "wp_head",
            Self::AdminMenu => "admin_menu",
            Self::AdminInit => "admin_init",
            Self::AddMetaBoxes => "add_meta_boxes",
            Self::SaveItem => "save_post",
        }
    }
}

/// Default priority of a callback.
pub const DEFAULT_PRIORITY: i32 = 10;

pub type TitleFilter<'a> = Box<dyn Fn(&RenderContext, String) -> String + 'a>;
pub type TitlePartsFilter<'a> = Box<dyn Fn(&RenderContext, TitleParts) -> TitleParts + 'a>;
pub type HeadAction<'a> = Box<dyn Fn(&RenderContext, &mut String) + 'a>;
pub type SaveAction<'a> = Box<dyn Fn(&SaveRequest) -> SaveOutcome + 'a>;

/// Callbacks of one stage, kept sorted by priority.
struct Handlers<F> {
    entries: Vec<(i32, F)>,
}

impl<F> Default for Handlers<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> Handlers<F> {
    fn add(&mut self, priority: i32, callback: F) {
        // after every entry with the same priority
        let at = self.entries.partition_point(|(p, _)| *p <= priority);
        self.entries.insert(at, (priority, callback));
    }

    fn iter(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(_, f)| f)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Stage-keyed dispatch table.
#[derive(Default)]
pub struct Hooks<'a> {
    title: Handlers<TitleFilter<'a>>,
    title_parts: Handlers<TitlePartsFilter<'a>>,
    head: Handlers<HeadAction<'a>>,
    save_item: Handlers<SaveAction<'a>>,
    menu_pages: Vec<MenuPage<'a>>,
    settings: Vec<SettingsRegistration<'a>>,
    meta_boxes: Vec<MetaBox<'a>>,
}

impl<'a> Hooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // registration
    // ------------------------------------------------------------------------

    pub fn add_title_filter(
        &mut self,
        priority: i32,
        filter: impl Fn(&RenderContext, String) -> String + 'a,
    ) {
        self.title.add(priority, Box::new(filter));
    }

    pub fn add_title_parts_filter(
        &mut self,
        priority: i32,
        filter: impl Fn(&RenderContext, TitleParts) -> TitleParts + 'a,
    ) {
        self.title_parts.add(priority, Box::new(filter));
    }

    pub fn add_head_action(
        &mut self,
        priority: i32,
        action: impl Fn(&RenderContext, &mut String) + 'a,
    ) {
        self.head.add(priority, Box::new(action));
    }

    pub fn add_save_action(
        &mut self,
        priority: i32,
        action: impl Fn(&SaveRequest) -> SaveOutcome + 'a,
    ) {
        self.save_item.add(priority, Box::new(action));
    }

    pub fn add_menu_page(&mut self, page: MenuPage<'a>) {
        self.menu_pages.push(page);
    }

    pub fn register_setting(&mut self, setting: SettingsRegistration<'a>) {
        self.settings.push(setting);
    }

    pub fn add_meta_box(&mut self, meta_box: MetaBox<'a>) {
        self.meta_boxes.push(meta_box);
    }

    /// Number of callbacks or records attached to `stage`.
    pub fn count(&self, stage: Stage) -> usize {
        match stage {
            Stage::Title => self.title.len(),
            Stage::DocumentTitleParts => self.title_parts.len(),
            Stage::Head => self.head.len(),
            Stage::AdminMenu => self.menu_pages.len(),
            Stage::AdminInit => self.settings.len(),
            Stage::AddMetaBoxes => self.meta_boxes.len(),
            Stage::SaveItem => self.save_item.len(),
        }
    }

    // ------------------------------------------------------------------------
    // dispatch
    // ------------------------------------------------------------------------

    /// Run every title filter, each receiving the previous result.
    pub fn filter_title(&self, ctx: &RenderContext, title: String) -> String {
        self.title.iter().fold(title, |title, filter| filter(ctx, title))
    }

    pub fn filter_title_parts(&self, ctx: &RenderContext, parts: TitleParts) -> TitleParts {
        self.title_parts
            .iter()
            .fold(parts, |parts, filter| filter(ctx, parts))
    }

    /// Collect the markup every head action writes.
    pub fn render_head(&self, ctx: &RenderContext) -> String {
        let mut out = String::new();
        for action in self.head.iter() {
            action(ctx, &mut out);
        }
        out
    }

    /// Run the save actions of one item-save event.
    pub fn save_item(&self, request: &SaveRequest) -> Vec<SaveOutcome> {
        self.save_item
            .iter()
            .map(|action| {
                let outcome = action(request);
                debug!("save"; "item {}: {}", request.item, outcome);
                outcome
            })
            .collect()
    }

    pub fn menu_page(&self, slug: &str) -> Option<&MenuPage<'a>> {
        self.menu_pages.iter().find(|p| p.slug == slug)
    }

    pub fn setting(&self, option: &str) -> Option<&SettingsRegistration<'a>> {
        self.settings.iter().find(|s| s.option == option)
    }

    pub fn meta_boxes(&self) -> &[MetaBox<'a>] {
        &self.meta_boxes
    }

    /// Meta box shown on the edit screen of `content_type`.
    pub fn meta_box_for(&self, content_type: &str) -> Option<&MetaBox<'a>> {
        self.meta_boxes.iter().find(|b| b.screen == content_type)
    }
}
