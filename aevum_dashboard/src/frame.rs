// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pure frame builder.
//!
//! [`Dashboard::build_frame`] maps `(records, scales, interaction state)` to
//! a resolved mark list plus the pointer targets the shell needs to dispatch
//! events. It is a pure function: rebuilding with identical inputs yields an
//! identical frame, and nothing in here mutates the dataset or the state.

use kurbo::{BezPath, Point, Rect};
use peniko::color::palette::css;

use aevum_charts::{
    AxisSpec, BubbleMarkSpec, ChartLayout, ChartLayoutSpec, ChartSpec, GridStyle, LegendItem,
    LegendSpec, Pattern, RuleMarkSpec, ScaleLinearSpec, Size, StrokeStyle, TextMarkSpec,
    PANEL, PLOT_BACKGROUND, TOOLTIPS, TextMeasurer, TrendLineSpec, format_year,
};
use aevum_core::{Mark, MarkId, TextAnchor, TextBaseline};
use aevum_data::{
    EntityGroup, RowWarning, VisualRecord, distinct_calendar_types, group_by_entity,
};

use crate::scales::{ScaleSet, x_domain, y_domain};
use crate::state::InteractionState;
use crate::theme;
use crate::tooltip::tooltip_marks;

/// Fixed width of the visibility/legend side panel.
pub const PANEL_WIDTH: f64 = 240.0;

const OUTER_PADDING: f64 = 20.0;
const PANEL_GAP: f64 = 20.0;
const PANEL_PADDING: f64 = 14.0;
const BUTTON_HEIGHT: f64 = 26.0;
const BUTTON_GAP: f64 = 8.0;
const SECTION_GAP: f64 = 16.0;

const ID_AXIS_X: u64 = 0x10_000;
const ID_AXIS_Y: u64 = 0x11_000;
const ID_ZERO_RULE: u64 = 0x12_000;
const ID_TREND: u64 = 0x20_000;
const ID_BUBBLES: u64 = 0x30_000;
const ID_CALENDAR_LEGEND: u64 = 0x40_000;
const ID_ENTITY_LEGEND: u64 = 0x41_000;
const ID_PANEL: u64 = 0x50_000;
const ID_TOOLTIPS: u64 = 0x70_000;

/// A pointer-testable shape in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitShape {
    /// A filled circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// An axis-aligned rectangle.
    Rect(Rect),
}

impl HitShape {
    /// Whether `p` falls inside this shape.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Circle { center, radius } => center.distance(p) <= *radius,
            Self::Rect(rect) => rect.contains(p),
        }
    }
}

/// A hover target: entering it highlights an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverTarget {
    /// The sensitive region.
    pub shape: HitShape,
    /// The entity it highlights.
    pub entity: String,
}

/// A panel action bound to a clickable rectangle.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelAction {
    /// Flip one entity's visibility.
    Toggle(String),
    /// Make every entity visible.
    ShowAll,
    /// Hide every entity.
    HideAll,
}

/// A click target in the side panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickTarget {
    /// The sensitive rectangle.
    pub rect: Rect,
    /// The bound action.
    pub action: PanelAction,
}

/// One rendered frame: resolved marks plus pointer targets.
#[derive(Debug)]
pub struct Frame {
    /// The arranged layout the frame was built against.
    pub layout: ChartLayout,
    /// The scale set the frame was built with.
    pub scales: ScaleSet,
    /// The full mark list for the frame.
    pub marks: Vec<Mark>,
    /// Hover-sensitive regions (bubbles, entity legend rows).
    pub hover_targets: Vec<HoverTarget>,
    /// Click-sensitive regions (panel buttons).
    pub click_targets: Vec<ClickTarget>,
}

impl Frame {
    /// The topmost hovered entity at `p`, if any.
    pub fn hover_at(&self, p: Point) -> Option<&str> {
        self.hover_targets
            .iter()
            .rev()
            .find(|t| t.shape.contains(p))
            .map(|t| t.entity.as_str())
    }

    /// The panel action under `p`, if any.
    pub fn click_at(&self, p: Point) -> Option<&PanelAction> {
        self.click_targets
            .iter()
            .rev()
            .find(|t| t.rect.contains(p))
            .map(|t| &t.action)
    }
}

/// The loaded dataset plus everything derived once per load.
///
/// Construction is the only place raw records are processed; every frame
/// afterwards reuses these vectors untouched.
#[derive(Clone, Debug)]
pub struct Dashboard {
    records: Vec<VisualRecord>,
    groups: Vec<EntityGroup>,
    entities: Vec<String>,
    calendar_types: Vec<String>,
    warnings: Vec<RowWarning>,
}

impl Dashboard {
    /// Builds the dashboard model from normalized records.
    pub fn new(records: Vec<VisualRecord>, warnings: Vec<RowWarning>) -> Self {
        let groups = group_by_entity(&records);
        let entities = groups.iter().map(|g| g.entity.clone()).collect();
        let calendar_types = distinct_calendar_types(&records);
        Self {
            records,
            groups,
            entities,
            calendar_types,
            warnings,
        }
    }

    /// The normalized records, ascending by start year.
    pub fn records(&self) -> &[VisualRecord] {
        &self.records
    }

    /// Distinct entities in first-seen order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The initial interaction state: all entities visible.
    pub fn initial_state(&self) -> InteractionState {
        InteractionState::all_visible(&self.entities)
    }

    /// The pattern assigned to a calendar type (stable per dataset).
    pub fn pattern_for(&self, calendar_type: &str) -> Pattern {
        let index = self
            .calendar_types
            .iter()
            .position(|t| t == calendar_type)
            .unwrap_or(0);
        Pattern::for_calendar(calendar_type, index)
    }

    /// Builds a frame for the given view size and interaction state.
    pub fn build_frame(
        &self,
        view: Size,
        state: &InteractionState,
        measurer: &dyn TextMeasurer,
    ) -> Frame {
        let chart = ChartSpec {
            plot_size: Size::default(),
            layout: ChartLayoutSpec {
                view_size: Some(view),
                outer_padding: OUTER_PADDING,
                side_panel: Some(PANEL_WIDTH),
                panel_gap: PANEL_GAP,
                ..ChartLayoutSpec::default()
            },
            axis_bottom: Some(
                AxisSpec::bottom(ID_AXIS_X, ScaleLinearSpec::new(x_domain(&self.records)))
                    .with_tick_count(8)
                    .with_tick_formatter(|v, _| format_year(v))
                    .with_title("Year")
                    .with_title_offset(10.0),
            ),
            axis_left: Some(
                AxisSpec::left(ID_AXIS_Y, ScaleLinearSpec::new(y_domain(&self.records)))
                    .with_tick_count(6)
                    .with_grid(GridStyle::default())
                    .with_title("Prosperity Score")
                    .with_title_offset(10.0),
            ),
        };

        let mut scales_slot: Option<ScaleSet> = None;
        let mut hover_targets: Vec<HoverTarget> = Vec::new();

        let (layout, mut marks) = chart.marks(measurer, |_, data| {
            let scales = ScaleSet::build(&self.records, &self.groups, data);
            let mut out = Vec::new();

            // Reference line at score zero, when zero is inside the domain.
            let (y0, y1) = y_domain(&self.records);
            if y0 < 0.0 && y1 > 0.0 {
                out.push(
                    RuleMarkSpec::horizontal(
                        MarkId::from_raw(ID_ZERO_RULE),
                        scales.y.map(0.0),
                        data.x0,
                        data.x1,
                    )
                    .with_stroke(css::BLACK.with_alpha(0.5), 1.0)
                    .with_dash_pattern([4.0, 4.0])
                    .mark(),
                );
            }

            // Trend lines, one smoothed curve per visible entity.
            for (gi, group) in self.groups.iter().enumerate() {
                if !state.is_visible(&group.entity) || group.records.len() < 2 {
                    continue;
                }
                let alpha = series_alpha(state.highlighted.as_deref(), &group.entity);
                let mut weight = scales.weight_for(group);
                if state.highlighted.as_deref() == Some(group.entity.as_str()) {
                    weight *= 2.0;
                }
                let points: Vec<Point> =
                    group.records.iter().map(|r| scales.position(r)).collect();
                out.push(
                    TrendLineSpec::new(MarkId::from_raw(ID_TREND + gi as u64), points)
                        .with_stroke(StrokeStyle::solid(
                            scales.color_for(&group.entity).with_alpha(alpha as f32),
                            weight,
                        ))
                        .mark(),
                );
            }

            // Bubbles, one marker per visible record.
            for (ri, record) in self.records.iter().enumerate() {
                if !state.is_visible(&record.entity) {
                    continue;
                }
                let alpha = series_alpha(state.highlighted.as_deref(), &record.entity);
                let center = scales.position(record);
                let radius = scales.radius_for(record);
                out.extend(
                    BubbleMarkSpec::new(
                        MarkId::from_raw(ID_BUBBLES + 2 * ri as u64),
                        center,
                        radius,
                        scales.color_for(&record.entity).with_alpha(alpha as f32),
                    )
                    .with_pattern(self.pattern_for(&record.calendar_type))
                    .with_pattern_stroke(css::BLACK.with_alpha((0.55 * alpha) as f32))
                    .marks(),
                );
                hover_targets.push(HoverTarget {
                    shape: HitShape::Circle { center, radius },
                    entity: record.entity.clone(),
                });
            }

            scales_slot = Some(scales);
            out
        });

        let scales = scales_slot.expect("series builder always runs");
        let mut click_targets: Vec<ClickTarget> = Vec::new();

        if let Some(panel) = layout.panel {
            marks.extend(self.panel_marks(
                panel,
                &scales,
                state,
                measurer,
                &mut hover_targets,
                &mut click_targets,
            ));
        }

        marks.extend(tooltip_marks(
            &state.tooltips,
            layout.view,
            measurer,
            ID_TOOLTIPS,
        ));

        Frame {
            layout,
            scales,
            marks,
            hover_targets,
            click_targets,
        }
    }

    fn panel_marks(
        &self,
        panel: Rect,
        scales: &ScaleSet,
        state: &InteractionState,
        measurer: &dyn TextMeasurer,
        hover_targets: &mut Vec<HoverTarget>,
        click_targets: &mut Vec<ClickTarget>,
    ) -> Vec<Mark> {
        let mut out = Vec::new();

        out.push(
            Mark::rect(MarkId::from_raw(ID_PANEL), panel, theme::panel_background())
                .with_z_index(PLOT_BACKGROUND),
        );
        out.push(
            Mark::path(MarkId::from_raw(ID_PANEL + 1), rect_outline(panel))
                .with_stroke(theme::panel_border(), 1.0)
                .with_z_index(PLOT_BACKGROUND + 1),
        );

        let x = panel.x0 + PANEL_PADDING;
        let width = panel.width() - 2.0 * PANEL_PADDING;
        let mut y = panel.y0 + PANEL_PADDING;

        // Calendar-type pattern legend.
        let calendar_items: Vec<LegendItem> = self
            .calendar_types
            .iter()
            .map(|t| LegendItem::pattern(t.clone(), self.pattern_for(t)))
            .collect();
        if !calendar_items.is_empty() {
            let legend = LegendSpec::new(ID_CALENDAR_LEGEND, calendar_items);
            let size = legend.measure(measurer);
            out.extend(legend.marks(x, y));
            y += size.height + SECTION_GAP;
        }

        // Entity line legend; rows double as hover targets.
        let entity_items: Vec<LegendItem> = self
            .groups
            .iter()
            .map(|g| {
                LegendItem::line(
                    g.entity.clone(),
                    scales.color_for(&g.entity),
                    scales.weight_for(g),
                )
            })
            .collect();
        if !entity_items.is_empty() {
            let legend = LegendSpec::new(ID_ENTITY_LEGEND, entity_items);
            let size = legend.measure(measurer);
            for (rect, group) in legend
                .item_rects(x, y, measurer)
                .into_iter()
                .zip(&self.groups)
            {
                hover_targets.push(HoverTarget {
                    shape: HitShape::Rect(rect),
                    entity: group.entity.clone(),
                });
            }
            out.extend(legend.marks(x, y));
            y += size.height + SECTION_GAP;
        }

        // Bulk actions.
        let show_rect = Rect::new(x, y, x + width, y + BUTTON_HEIGHT);
        out.extend(button_marks(
            ID_PANEL + 0x100,
            show_rect,
            theme::show_all_fill(),
            None,
            "Show All",
            css::WHITE,
            true,
        ));
        click_targets.push(ClickTarget {
            rect: show_rect,
            action: PanelAction::ShowAll,
        });
        y += BUTTON_HEIGHT + BUTTON_GAP;

        let hide_rect = Rect::new(x, y, x + width, y + BUTTON_HEIGHT);
        out.extend(button_marks(
            ID_PANEL + 0x110,
            hide_rect,
            theme::hide_all_fill(),
            None,
            "Hide All",
            css::WHITE,
            true,
        ));
        click_targets.push(ClickTarget {
            rect: hide_rect,
            action: PanelAction::HideAll,
        });
        y += BUTTON_HEIGHT + SECTION_GAP;

        // One color-coded toggle per entity.
        for (i, entity) in self.entities.iter().enumerate() {
            let color = scales.color_for(entity);
            let visible = state.is_visible(entity);
            let (fill, label_fill) = if visible {
                (color, css::WHITE)
            } else {
                (theme::lighten(color, 0.9), color)
            };
            let rect = Rect::new(x, y, x + width, y + BUTTON_HEIGHT);
            out.extend(button_marks(
                ID_PANEL + 0x200 + 4 * i as u64,
                rect,
                fill,
                Some(color),
                entity,
                label_fill,
                false,
            ));
            click_targets.push(ClickTarget {
                rect,
                action: PanelAction::Toggle(entity.clone()),
            });
            y += BUTTON_HEIGHT + BUTTON_GAP;
        }

        // Non-fatal load warnings surface at the panel's foot.
        if !self.warnings.is_empty() {
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(ID_PANEL + 0x50),
                    Point::new(x, panel.y1 - PANEL_PADDING),
                    format!("{} malformed row(s) dropped", self.warnings.len()),
                )
                .with_font_size(9.0)
                .with_fill(css::DARK_GRAY)
                .with_baseline(TextBaseline::Alphabetic)
                .with_z_index(PANEL)
                .mark(),
            );
        }

        out
    }
}

fn series_alpha(highlighted: Option<&str>, entity: &str) -> f64 {
    match highlighted {
        None => 0.7,
        Some(h) if h == entity => 1.0,
        Some(_) => 0.3,
    }
}

fn rect_outline(rect: Rect) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((rect.x0, rect.y0));
    p.line_to((rect.x1, rect.y0));
    p.line_to((rect.x1, rect.y1));
    p.line_to((rect.x0, rect.y1));
    p.close_path();
    p
}

fn button_marks(
    id_base: u64,
    rect: Rect,
    fill: peniko::Color,
    border: Option<peniko::Color>,
    label: &str,
    label_fill: peniko::Color,
    centered: bool,
) -> Vec<Mark> {
    let mut out = Vec::new();
    out.push(
        Mark::rect(MarkId::from_raw(id_base), rect, fill).with_z_index(PANEL),
    );
    if let Some(border) = border {
        out.push(
            Mark::path(MarkId::from_raw(id_base + 1), rect_outline(rect))
                .with_stroke(border, 1.0)
                .with_z_index(PANEL),
        );
    }
    let (pos, anchor) = if centered {
        (
            Point::new(rect.center().x, rect.center().y),
            TextAnchor::Middle,
        )
    } else {
        (
            Point::new(rect.x0 + 8.0, rect.center().y),
            TextAnchor::Start,
        )
    };
    out.push(
        TextMarkSpec::new(MarkId::from_raw(id_base + 2), pos, label)
            .with_font_size(11.0)
            .with_fill(label_fill)
            .with_anchor(anchor)
            .with_baseline(TextBaseline::Middle)
            .with_z_index(PANEL)
            .mark(),
    );
    out
}

#[cfg(test)]
mod tests {
    use aevum_charts::HeuristicTextMeasurer;
    use aevum_core::MarkPayload;
    use aevum_data::{RawRecord, normalize};

    use crate::state::InteractionEvent;

    use super::*;

    fn raw(name: &str, cal: &str, start: i32, end: i32, score: f64) -> RawRecord {
        RawRecord {
            civilization: name.to_owned(),
            calendar_system: String::new(),
            calendar_type: cal.to_owned(),
            start_year: start,
            end_year: end,
            period: "P".to_owned(),
            score,
            key_events: String::new(),
        }
    }

    fn dashboard() -> Dashboard {
        let rows = vec![
            raw("Rome", "Solar", -500, 476, 80.0),
            raw("Rome", "Solar", 476, 1453, 55.0),
            raw("Maya", "Lunar", -2000, 900, 60.0),
            raw("Maya", "Lunar", 900, 1500, -10.0),
        ];
        Dashboard::new(normalize(&rows), Vec::new())
    }

    fn view() -> Size {
        Size {
            width: 1200.0,
            height: 800.0,
        }
    }

    #[test]
    fn frame_building_is_pure_and_repeatable() {
        let dash = dashboard();
        let state = dash.initial_state();
        let measurer = HeuristicTextMeasurer;
        let a = dash.build_frame(view(), &state, &measurer);
        let b = dash.build_frame(view(), &state, &measurer);
        assert_eq!(a.marks, b.marks);
        assert!(!a.marks.is_empty());
    }

    #[test]
    fn hidden_entities_drop_their_series_and_hover_targets() {
        let dash = dashboard();
        let measurer = HeuristicTextMeasurer;
        let all = dash.build_frame(view(), &dash.initial_state(), &measurer);
        let state = dash.initial_state().apply(
            &InteractionEvent::Toggle("Rome".into()),
            dash.records(),
            dash.entities(),
            &all.scales,
        );
        let frame = dash.build_frame(view(), &state, &measurer);
        assert!(frame.marks.len() < all.marks.len());
        assert!(
            frame
                .hover_targets
                .iter()
                .filter(|t| matches!(t.shape, HitShape::Circle { .. }))
                .all(|t| t.entity == "Maya")
        );
    }

    #[test]
    fn hovering_a_bubble_resolves_its_entity() {
        let dash = dashboard();
        let measurer = HeuristicTextMeasurer;
        let frame = dash.build_frame(view(), &dash.initial_state(), &measurer);
        let bubble = frame
            .hover_targets
            .iter()
            .find(|t| matches!(t.shape, HitShape::Circle { .. }))
            .expect("has bubbles");
        let HitShape::Circle { center, .. } = bubble.shape else {
            unreachable!();
        };
        assert_eq!(frame.hover_at(center), Some(bubble.entity.as_str()));
        // A point far outside everything hits nothing.
        assert_eq!(frame.hover_at(Point::new(-1000.0, -1000.0)), None);
    }

    #[test]
    fn panel_buttons_map_to_their_actions() {
        let dash = dashboard();
        let measurer = HeuristicTextMeasurer;
        let frame = dash.build_frame(view(), &dash.initial_state(), &measurer);
        let show = frame
            .click_targets
            .iter()
            .find(|t| t.action == PanelAction::ShowAll)
            .expect("show-all button");
        assert_eq!(
            frame.click_at(show.rect.center()),
            Some(&PanelAction::ShowAll)
        );
        let toggles = frame
            .click_targets
            .iter()
            .filter(|t| matches!(t.action, PanelAction::Toggle(_)))
            .count();
        assert_eq!(toggles, dash.entities().len());
    }

    #[test]
    fn highlight_doubles_the_trend_weight() {
        let dash = dashboard();
        let measurer = HeuristicTextMeasurer;
        let plain = dash.build_frame(view(), &dash.initial_state(), &measurer);
        let hovered_state = dash.initial_state().apply(
            &InteractionEvent::HoverEnter("Rome".into()),
            dash.records(),
            dash.entities(),
            &plain.scales,
        );
        let hovered = dash.build_frame(view(), &hovered_state, &measurer);

        let rome_line_width = |frame: &Frame| -> f64 {
            // Rome is the second group (Maya starts earlier).
            let id = MarkId::from_raw(ID_TREND + 1);
            frame
                .marks
                .iter()
                .find(|m| m.id == id)
                .and_then(|m| match &m.payload {
                    MarkPayload::Path(p) => Some(p.stroke_width),
                    _ => None,
                })
                .expect("trend line")
        };
        let w0 = rome_line_width(&plain);
        let w1 = rome_line_width(&hovered);
        assert!((w1 - 2.0 * w0).abs() < 1e-9);
    }

    #[test]
    fn zero_rule_tracks_the_score_domain() {
        let dash = dashboard(); // Maya's -10 pulls the domain below zero.
        let measurer = HeuristicTextMeasurer;
        let frame = dash.build_frame(view(), &dash.initial_state(), &measurer);
        assert!(
            frame
                .marks
                .iter()
                .any(|m| m.id == MarkId::from_raw(ID_ZERO_RULE))
        );

        let positive = Dashboard::new(
            normalize(&[
                raw("Rome", "Solar", -500, 476, 80.0),
                raw("Maya", "Lunar", -2000, 900, 60.0),
            ]),
            Vec::new(),
        );
        let frame = positive.build_frame(view(), &positive.initial_state(), &measurer);
        assert!(
            !frame
                .marks
                .iter()
                .any(|m| m.id == MarkId::from_raw(ID_ZERO_RULE))
        );
    }

    #[test]
    fn patterns_follow_the_calendar_types() {
        use aevum_charts::PatternKind;
        let dash = dashboard();
        assert_eq!(dash.pattern_for("Solar").kind, PatternKind::Sun);
        assert_eq!(dash.pattern_for("Lunar").kind, PatternKind::Moon);
        // Unknown types cycle through the base motifs by first-seen index.
        assert!(matches!(
            dash.pattern_for("Ritual").kind,
            PatternKind::Base(_)
        ));
    }

    #[test]
    fn empty_dataset_still_produces_a_frame() {
        let dash = Dashboard::new(Vec::new(), Vec::new());
        assert!(dash.is_empty());
        let measurer = HeuristicTextMeasurer;
        let frame = dash.build_frame(view(), &dash.initial_state(), &measurer);
        // Axes and panel chrome render; no series, no hover targets.
        assert!(!frame.marks.is_empty());
        assert!(frame.hover_targets.is_empty());
    }

    #[test]
    fn tooltips_render_above_everything() {
        let dash = dashboard();
        let measurer = HeuristicTextMeasurer;
        let base = dash.build_frame(view(), &dash.initial_state(), &measurer);
        let state = dash.initial_state().apply(
            &InteractionEvent::HoverEnter("Maya".into()),
            dash.records(),
            dash.entities(),
            &base.scales,
        );
        let frame = dash.build_frame(view(), &state, &measurer);
        let max_z = frame.marks.iter().map(|m| m.z_index).max().unwrap();
        assert_eq!(max_z, TOOLTIPS);
        // Two Maya records → two payload backdrops.
        let backdrops = frame
            .marks
            .iter()
            .filter(|m| {
                m.z_index == TOOLTIPS && matches!(m.payload, MarkPayload::Rect(_))
            })
            .count();
        assert_eq!(backdrops, 2);
    }
}
