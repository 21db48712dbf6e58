//! Ad metadata presentation
//!
//! [`project`] turns the live ad snapshot into display strings and a skip
//! control state. [`AdPanel`] writes that view into whatever surface the
//! page provides, looking the surface up once on first use.

use crate::{AdMetadata, SkipAction};
use std::cell::OnceCell;
use std::fmt;
use tracing::debug;

/// Shown for numeric fields the SDK left out
pub const NOT_APPLICABLE: &str = "N/A";

/// Display fields of the ad panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdField {
    SubType,
    Order,
    TotalCount,
    SecondsToSkippable,
    SecondsToEnd,
    CanSkip,
    IsSkippable,
}

impl AdField {
    pub const ALL: [AdField; 7] = [
        AdField::SubType,
        AdField::Order,
        AdField::TotalCount,
        AdField::SecondsToSkippable,
        AdField::SecondsToEnd,
        AdField::CanSkip,
        AdField::IsSkippable,
    ];

    /// Identifier of the backing element
    pub fn element_id(&self) -> &'static str {
        match self {
            AdField::SubType => "subType",
            AdField::Order => "order",
            AdField::TotalCount => "totalCount",
            AdField::SecondsToSkippable => "secondsToSkippable",
            AdField::SecondsToEnd => "secondsToEnd",
            AdField::CanSkip => "canSkip",
            AdField::IsSkippable => "isSkippable",
        }
    }
}

/// Identifier of the skip button
pub const SKIP_CONTROL_ID: &str = "skip";

/// State of the skip button
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkipControl {
    pub enabled: bool,
    pub action: SkipAction,
}

/// Rendered ad panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdPanelView {
    pub sub_type: String,
    pub order: String,
    pub total_count: String,
    pub seconds_to_skippable: String,
    pub seconds_to_end: String,
    pub can_skip: String,
    pub is_skippable: String,
    pub skip: SkipControl,
}

impl AdPanelView {
    pub fn field(&self, field: AdField) -> &str {
        match field {
            AdField::SubType => &self.sub_type,
            AdField::Order => &self.order,
            AdField::TotalCount => &self.total_count,
            AdField::SecondsToSkippable => &self.seconds_to_skippable,
            AdField::SecondsToEnd => &self.seconds_to_end,
            AdField::CanSkip => &self.can_skip,
            AdField::IsSkippable => &self.is_skippable,
        }
    }
}

/// Render like JS `Number#toString`: "30" not "30.0", "Infinity", no "-0",
/// exponent form ("1e+21") outside [1e-6, 1e21)
fn number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), number)
}

fn flag(value: bool) -> String {
    String::from(if value { "true" } else { "false" })
}

/// Project a snapshot into display form. `None` clears the panel.
pub fn project(metadata: Option<&AdMetadata>) -> AdPanelView {
    let Some(ad) = metadata else {
        return AdPanelView::default();
    };

    let skip = if ad.can_trigger_skip {
        SkipControl {
            enabled: true,
            action: ad.skip.clone(),
        }
    } else {
        SkipControl::default()
    };

    AdPanelView {
        sub_type: ad.sub_type.clone(),
        order: optional_number(ad.order),
        total_count: optional_number(ad.total_count),
        seconds_to_skippable: optional_number(ad.seconds_to_skippable),
        seconds_to_end: number(ad.seconds_to_end),
        can_skip: flag(ad.can_trigger_skip),
        is_skippable: flag(ad.is_skippable),
        skip,
    }
}

/// Display elements the panel writes into
pub trait PresentationSurface {
    fn set_field(&self, field: AdField, text: &str);

    fn set_skip_control(&self, control: &SkipControl);
}

/// Resolves the presentation surface; called at most once per session
pub trait PresentationLookup {
    fn lookup(&self) -> Box<dyn PresentationSurface>;
}

impl<F> PresentationLookup for F
where
    F: Fn() -> Box<dyn PresentationSurface>,
{
    fn lookup(&self) -> Box<dyn PresentationSurface> {
        self()
    }
}

/// Ad panel bound to a lazily resolved presentation surface
pub struct AdPanel {
    lookup: Box<dyn PresentationLookup>,
    surface: OnceCell<Box<dyn PresentationSurface>>,
}

impl AdPanel {
    pub fn new(lookup: impl PresentationLookup + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
            surface: OnceCell::new(),
        }
    }

    /// Render a snapshot, replacing whatever was shown before
    pub fn render(&self, metadata: Option<&AdMetadata>) {
        let view = project(metadata);
        let surface = self.surface.get_or_init(|| {
            debug!("Resolving ad panel elements");
            self.lookup.lookup()
        });

        for field in AdField::ALL {
            surface.set_field(field, view.field(field));
        }
        surface.set_skip_control(&view.skip);
    }
}

impl fmt::Debug for AdPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdPanel")
            .field("resolved", &self.surface.get().is_some())
            .finish()
    }
}
