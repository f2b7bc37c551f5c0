//! # Report Layout
//!
//! Lays out a [`ResultBundle`] as a paginated [`Document`] of positioned
//! primitives (text, filled rectangles, circles). Coordinates are in
//! millimetres on an A4 page with the origin at the top-left corner; text `y`
//! is the baseline. A renderer such as [`crate::pdf`] turns the document into
//! a file.
//!
//! ## Section Order
//!
//! 1. Title block
//! 2. Personal Information
//! 3. BMI Analysis Results
//! 4. BMI Category Chart
//! 5. Health Recommendations
//! 6. Personalized Workout Plan
//! 7. Weekly Workout Schedule
//! 8. 4-Week Progress Plan
//! 9. Important Notes & Disclaimers
//!
//! Every page carries a footer with the generator line and `Page n of N`.
//!
//! ## Page Breaks
//!
//! A text block that would cross the bottom margin starts a new page before
//! its first line, so blocks are never split. Only a block taller than a
//! whole page is split, at the margin.

use serde::{Deserialize, Serialize};

use crate::calculations::body_composition::WeightDirection;
use crate::calculations::bmi::BmiCategory;
use crate::calculations::ResultBundle;
use crate::units::{format_height, format_weight};
use crate::workout::{day_name, progress_plan};

/// A4 width (mm)
pub const PAGE_WIDTH: f64 = 210.0;
/// A4 height (mm)
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN: f64 = 20.0;

const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
const CONTENT_BOTTOM: f64 = PAGE_HEIGHT - MARGIN;
const BLOCK_SPACING: f64 = 5.0;
const MM_PER_POINT: f64 = 0.3528;
/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH_EM: f64 = 0.5;

/// Highest BMI shown on the chart; larger values pin the marker to the edge
pub const CHART_MAX_BMI: f64 = 50.0;
const CHART_HEIGHT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(100, 100, 100);
    pub const ACCENT: Rgb = Rgb(59, 130, 246);
    pub const MARKER: Rgb = Rgb(255, 0, 0);
    pub const CHART_BACKGROUND: Rgb = Rgb(245, 245, 245);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// A positioned layout primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Text {
        x: f64,
        /// Baseline
        y: f64,
        text: String,
        /// Points
        size: f64,
        style: FontStyle,
        color: Rgb,
        align: TextAlign,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Rgb,
    },
}

impl Element {
    /// The text of a `Text` element
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based
    pub number: u32,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_width: f64,
    pub page_height: f64,
    pub pages: Vec<Page>,
}

impl Document {
    /// All text in layout order, across pages
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(Element::text)
    }
}

/// Fixed strings of the report frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub title: String,
    pub subtitle: String,
    pub generator: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            title: "BMI Health & Fitness Report".to_string(),
            subtitle: "Personalized Health Analysis & Workout Plan".to_string(),
            generator: "Generated by BMI Calculator Pro".to_string(),
        }
    }
}

/// Baseline advance for one line of text (mm)
pub fn line_height(size: f64) -> f64 {
    size * 0.4
}

/// Greedy word wrap using an average glyph width for the font size.
///
/// Words longer than a whole line are split.
pub fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let glyph = size * MM_PER_POINT * GLYPH_WIDTH_EM;
    let max_chars = ((max_width / glyph).floor() as usize).max(1);

    // Keep leading indentation on the first line
    let indent_len = text.len() - text.trim_start().len();
    let mut lines = Vec::new();
    let mut current = text[..indent_len].to_string();
    let mut current_len = current.chars().count();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let needed = if current.trim().is_empty() { word.len() } else { word.len() + 1 };
            if current_len + needed <= max_chars {
                if !current.trim().is_empty() {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += needed;
                break;
            }
            if !current.trim().is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            // Word alone does not fit: hard split
            let room = max_chars.saturating_sub(current_len).max(1);
            let rest = word.split_off(room.min(word.len()));
            current.extend(word.iter());
            lines.push(std::mem::take(&mut current));
            current_len = 0;
            if rest.is_empty() {
                break;
            }
            word = rest;
        }
    }

    if !current.trim().is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cursor-based page builder.
struct Layout {
    pages: Vec<Page>,
    y: f64,
}

impl Layout {
    fn new() -> Self {
        Layout {
            pages: vec![Page { number: 1, elements: Vec::new() }],
            y: MARGIN,
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn new_page(&mut self) {
        let number = self.pages.len() as u32 + 1;
        self.pages.push(Page { number, elements: Vec::new() });
        self.y = MARGIN;
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |p| p.elements.is_empty())
    }

    /// Break before content spanning `height` below the cursor if it would
    /// cross the bottom margin.
    fn reserve(&mut self, height: f64) {
        if self.y + height > CONTENT_BOTTOM && !self.page_is_empty() {
            self.new_page();
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn text_line(&mut self, x: f64, y: f64, text: String, size: f64, style: FontStyle, color: Rgb, align: TextAlign) {
        self.push(Element::Text { x, y, text, size, style, color, align });
    }

    fn text_block(&mut self, text: &str, size: f64, style: FontStyle) {
        let lines = wrap_text(text, size, CONTENT_WIDTH);
        let lh = line_height(size);
        let span = (lines.len().saturating_sub(1)) as f64 * lh;
        self.reserve(span);

        for line in lines {
            if self.y > CONTENT_BOTTOM {
                self.new_page();
            }
            let y = self.y;
            self.text_line(MARGIN, y, line, size, style, Rgb::BLACK, TextAlign::Left);
            self.y += lh;
        }
        self.y += BLOCK_SPACING;
    }

    fn gap(&mut self, mm: f64) {
        self.y += mm;
    }

    fn section_header(&mut self, title: &str) {
        self.y += 10.0;
        // Keep the bar together with at least one line of content
        self.reserve(15.0 + line_height(12.0));
        if self.page_is_empty() {
            self.y = MARGIN + 8.0;
        }

        let y = self.y;
        self.push(Element::Rect {
            x: MARGIN,
            y: y - 8.0,
            width: CONTENT_WIDTH,
            height: 10.0,
            fill: Rgb::ACCENT,
        });
        self.text_line(MARGIN + 5.0, y, title.to_string(), 16.0, FontStyle::Bold, Rgb::WHITE, TextAlign::Left);
        self.y += 15.0;
    }

    /// Heading plus chart, kept together on one page.
    fn bmi_chart(&mut self, heading: &str, bmi: f64) {
        let heading_size = 14.0;
        // Marker label sits 5 mm above the bar
        self.reserve(line_height(heading_size) + BLOCK_SPACING + CHART_HEIGHT + 5.0);
        self.text_block(heading, heading_size, FontStyle::Bold);
        let chart_y = self.y;

        self.push(Element::Rect {
            x: MARGIN,
            y: chart_y,
            width: CONTENT_WIDTH,
            height: CHART_HEIGHT,
            fill: Rgb::CHART_BACKGROUND,
        });

        let mut x = MARGIN;
        for category in BmiCategory::ALL {
            let (lower, upper) = category.bounds();
            let lower = lower.unwrap_or(0.0);
            let upper = upper.unwrap_or(CHART_MAX_BMI);
            let width = CONTENT_WIDTH * (upper - lower) / CHART_MAX_BMI;

            self.push(Element::Rect {
                x,
                y: chart_y,
                width,
                height: CHART_HEIGHT,
                fill: band_color(category),
            });
            self.text_line(x + 2.0, chart_y + 15.0, category.chart_label().to_string(), 8.0, FontStyle::Normal, Rgb::BLACK, TextAlign::Left);
            self.text_line(x + 2.0, chart_y + 22.0, format!("{}-{}", lower, upper), 8.0, FontStyle::Normal, Rgb::BLACK, TextAlign::Left);
            x += width;
        }

        let marker_x = chart_marker_x(bmi);
        self.push(Element::Circle {
            cx: marker_x,
            cy: chart_y + CHART_HEIGHT / 2.0,
            radius: 3.0,
            fill: Rgb::MARKER,
        });
        let label_x = (marker_x - 15.0).clamp(MARGIN, PAGE_WIDTH - MARGIN - 30.0);
        self.text_line(label_x, chart_y - 5.0, format!("Your BMI: {:.1}", bmi), 10.0, FontStyle::Bold, Rgb::BLACK, TextAlign::Left);

        self.y = chart_y + CHART_HEIGHT + 20.0;
    }

    fn finish(mut self, options: &ReportOptions) -> Document {
        let total = self.pages.len();
        for page in &mut self.pages {
            page.elements.push(Element::Text {
                x: PAGE_WIDTH / 2.0,
                y: PAGE_HEIGHT - 12.0,
                text: options.generator.clone(),
                size: 10.0,
                style: FontStyle::Normal,
                color: Rgb::GRAY,
                align: TextAlign::Center,
            });
            page.elements.push(Element::Text {
                x: PAGE_WIDTH / 2.0,
                y: PAGE_HEIGHT - 6.0,
                text: format!("Page {} of {}", page.number, total),
                size: 10.0,
                style: FontStyle::Normal,
                color: Rgb::GRAY,
                align: TextAlign::Center,
            });
        }
        Document {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            pages: self.pages,
        }
    }
}

/// Chart band color for a category
pub fn band_color(category: BmiCategory) -> Rgb {
    match category {
        BmiCategory::Underweight => Rgb(135, 206, 235),
        BmiCategory::Normal => Rgb(144, 238, 144),
        BmiCategory::Overweight => Rgb(255, 255, 0),
        BmiCategory::ObeseI => Rgb(255, 165, 0),
        BmiCategory::ObeseII => Rgb(255, 99, 71),
        BmiCategory::ObeseIII => Rgb(220, 20, 60),
    }
}

/// Horizontal marker position for a BMI, clamped to the chart.
pub fn chart_marker_x(bmi: f64) -> f64 {
    MARGIN + CONTENT_WIDTH * bmi.clamp(0.0, CHART_MAX_BMI) / CHART_MAX_BMI
}

const DISCLAIMERS: [&str; 5] = [
    "• Consult with a healthcare provider before starting any new exercise program",
    "• Listen to your body and adjust intensity as needed",
    "• Stay hydrated and maintain proper nutrition",
    "• This report is for informational purposes only and should not replace professional medical advice",
    "• BMI calculations may not be accurate for athletes, pregnant women, or individuals with certain medical conditions",
];

/// Lay out a report with the default frame strings.
pub fn format_report(bundle: &ResultBundle) -> Document {
    format_report_with(bundle, &ReportOptions::default())
}

/// Lay out a report.
pub fn format_report_with(bundle: &ResultBundle, options: &ReportOptions) -> Document {
    use FontStyle::*;

    let mut layout = Layout::new();
    let subject = &bundle.subject;
    let unit = subject.weight_unit();

    layout.text_line(PAGE_WIDTH / 2.0, 40.0, options.title.clone(), 24.0, Bold, Rgb::ACCENT, TextAlign::Center);
    layout.text_line(PAGE_WIDTH / 2.0, 55.0, options.subtitle.clone(), 16.0, Normal, Rgb::GRAY, TextAlign::Center);
    layout.text_line(
        PAGE_WIDTH / 2.0,
        70.0,
        format!("Generated on: {}", bundle.generated_on.format("%Y-%m-%d")),
        12.0,
        Normal,
        Rgb::BLACK,
        TextAlign::Center,
    );
    layout.y = 90.0;

    layout.section_header("Personal Information");
    layout.text_block(&format!("Age: {} years", subject.age()), 12.0, Normal);
    layout.text_block(&format!("Gender: {}", subject.gender()), 12.0, Normal);
    layout.text_block(&format!("Height: {}", format_height(subject.height_cm(), subject.height_unit())), 12.0, Normal);
    layout.text_block(&format!("Weight: {}", format_weight(subject.weight_kg(), unit)), 12.0, Normal);

    layout.section_header("BMI Analysis Results");
    layout.text_block(&format!("BMI Score: {:.1}", bundle.bmi.bmi), 14.0, Bold);
    layout.text_block(&format!("Category: {}", bundle.bmi.category.label()), 12.0, Normal);
    layout.text_block(&format!("Body Fat Percentage: {:.1}%", bundle.body_composition.body_fat_percent), 12.0, Normal);
    layout.text_block(&format!("Ideal Weight: {:.1} {}", bundle.ideal_weight(), unit.suffix()), 12.0, Normal);
    let status = &bundle.weight_status;
    let direction = match status.direction {
        WeightDirection::Above => "above",
        WeightDirection::Below => "below",
        WeightDirection::At => "at",
    };
    layout.text_block(
        &format!("Weight Status: {:.1} {} {} ideal weight", status.difference, unit.suffix(), direction),
        12.0,
        Normal,
    );

    layout.gap(10.0);
    layout.bmi_chart("BMI Category Chart:", bundle.bmi.bmi);

    layout.section_header("Health Recommendations");
    for (i, rec) in bundle.recommendations.iter().enumerate() {
        layout.text_block(&format!("{}. {}", i + 1, rec.title), 12.0, Bold);
        layout.text_block(&format!("   {}", rec.description), 11.0, Normal);
        layout.text_block(&format!("   Priority: {}", rec.priority.to_string().to_uppercase()), 10.0, Italic);
        layout.gap(3.0);
    }

    layout.section_header("Personalized Workout Plan");
    for plan in &bundle.workout_plans {
        layout.text_block(&plan.category, 14.0, Bold);
        layout.text_block(&format!("Frequency: {}", plan.frequency), 11.0, Normal);
        layout.text_block(&format!("Duration: {}", plan.duration), 11.0, Normal);
        layout.text_block(&format!("Intensity: {}", plan.intensity), 11.0, Normal);

        layout.gap(5.0);
        layout.text_block("Exercises:", 12.0, Bold);
        for exercise in &plan.exercises {
            layout.text_block(&format!("• {}", exercise.name), 11.0, Bold);
            layout.text_block(&format!("  Sets: {} | Reps: {}", exercise.sets, exercise.reps), 10.0, Normal);
            layout.text_block(&format!("  {}", exercise.description), 10.0, Italic);
            layout.gap(2.0);
        }

        layout.gap(5.0);
        layout.text_block("Tips for Success:", 12.0, Bold);
        for tip in &plan.tips {
            layout.text_block(&format!("• {}", tip), 10.0, Normal);
        }
        layout.gap(10.0);
    }

    layout.section_header("Weekly Workout Schedule");
    for day in &bundle.schedule.days {
        layout.text_block(&format!("{}:", day_name(day.day)), 12.0, Bold);
        if day.is_rest_day() {
            layout.text_block("  • Rest Day", 11.0, Italic);
        }
        for activity in &day.activities {
            layout.text_block(&format!("  • {} ({})", activity.category, activity.duration), 11.0, Normal);
        }
    }

    layout.section_header("4-Week Progress Plan");
    for week in progress_plan() {
        layout.text_block(&format!("Week {}:", week.week), 12.0, Bold);
        layout.text_block(&format!("  Target: {}", week.target), 11.0, Normal);
        layout.text_block(&format!("  Focus: {}", week.focus), 11.0, Normal);
        layout.gap(3.0);
    }

    layout.section_header("Important Notes & Disclaimers");
    for note in DISCLAIMERS {
        layout.text_block(note, 11.0, Normal);
    }

    let document = layout.finish(options);
    tracing::debug!(pages = document.pages.len(), "laid out report");
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::assess_on;
    use crate::subject::{Gender, Subject};
    use crate::units::Measurement;
    use chrono::NaiveDate;

    fn bundle(weight_kg: f64) -> ResultBundle {
        let subject = Subject::new(Measurement::kg(weight_kg), Measurement::cm(175.0), 45, Gender::Male)
            .unwrap();
        assess_on(&subject, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap()
    }

    fn text_elements(doc: &Document) -> Vec<(u32, f64, &str)> {
        doc.pages
            .iter()
            .flat_map(|p| {
                p.elements.iter().filter_map(move |e| match e {
                    Element::Text { y, text, .. } => Some((p.number, *y, text.as_str())),
                    _ => None,
                })
            })
            .collect()
    }

    #[test]
    fn test_wrap_text_short_line() {
        assert_eq!(wrap_text("Age: 30 years", 12.0, CONTENT_WIDTH), vec!["Age: 30 years"]);
        assert_eq!(wrap_text("", 12.0, CONTENT_WIDTH), vec![""]);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "word ".repeat(60);
        let lines = wrap_text(&text, 12.0, CONTENT_WIDTH);
        // 170 / (12·0.3528·0.5) = 80 chars per line
        assert!(lines.len() >= 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 80));
        assert_eq!(lines.join(" ").split_whitespace().count(), 60);
    }

    #[test]
    fn test_wrap_text_splits_long_word() {
        let text = "x".repeat(200);
        let lines = wrap_text(&text, 12.0, CONTENT_WIDTH);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().map(|l| l.len()).sum::<usize>(), 200);
    }

    #[test]
    fn test_wrap_text_keeps_indent() {
        let lines = wrap_text("   Priority: HIGH", 10.0, CONTENT_WIDTH);
        assert_eq!(lines, vec!["   Priority: HIGH"]);
    }

    #[test]
    fn test_section_order() {
        let doc = format_report(&bundle(70.0));
        let headers = [
            "Personal Information",
            "BMI Analysis Results",
            "BMI Category Chart:",
            "Health Recommendations",
            "Personalized Workout Plan",
            "Weekly Workout Schedule",
            "4-Week Progress Plan",
            "Important Notes & Disclaimers",
        ];
        let texts: Vec<&str> = doc.texts().collect();
        let positions: Vec<usize> = headers
            .iter()
            .map(|h| texts.iter().position(|t| t == h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(texts[0], "BMI Health & Fitness Report");
        assert!(texts.contains(&"Generated on: 2024-03-01"));
    }

    #[test]
    fn test_report_contents() {
        let doc = format_report(&bundle(70.0));
        let texts: Vec<&str> = doc.texts().collect();
        assert!(texts.contains(&"BMI Score: 22.9"));
        assert!(texts.contains(&"Category: Normal weight"));
        assert!(texts.contains(&"Weight: 70.0 kg"));
        // Body fat 21.6% at age 45
        assert!(texts.contains(&"1. Body Fat Reduction"));
        assert!(texts.contains(&"2. Regular Health Checkups"));
        assert!(texts.contains(&"   Priority: MEDIUM"));
        assert!(texts.contains(&"Sunday:"));
        assert!(texts.contains(&"  • Rest Day"));
        assert!(texts.contains(&"Your BMI: 22.9"));
        assert!(texts.iter().any(|t| t.starts_with("Weight Status:") && t.ends_with("ideal weight")));
    }

    #[test]
    fn test_footer_on_every_page() {
        let doc = format_report(&bundle(70.0));
        let total = doc.pages.len();
        assert!(total >= 2);
        for page in &doc.pages {
            let texts: Vec<&str> = page.elements.iter().filter_map(Element::text).collect();
            assert!(texts.contains(&"Generated by BMI Calculator Pro"));
            let expected = format!("Page {} of {}", page.number, total);
            assert!(texts.contains(&expected.as_str()));
        }
    }

    #[test]
    fn test_content_stays_inside_margins() {
        let doc = format_report(&bundle(120.0));
        for (_, y, text) in text_elements(&doc) {
            if text.starts_with("Page ") || text.starts_with("Generated by") {
                continue;
            }
            assert!(y >= MARGIN && y <= CONTENT_BOTTOM, "{text:?} at {y}");
        }
    }

    #[test]
    fn test_blocks_are_not_split() {
        let mut layout = Layout::new();
        layout.y = CONTENT_BOTTOM - 2.0;
        layout.push(Element::Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0, fill: Rgb::BLACK });
        let text = "word ".repeat(40);
        layout.text_block(&text, 12.0, FontStyle::Normal);

        assert_eq!(layout.pages.len(), 2);
        let second = &layout.pages[1];
        assert_eq!(second.elements.len(), 3);
        assert!(layout.pages[0].elements.iter().all(|e| e.text().is_none()));
    }

    #[test]
    fn test_chart_heading_moves_with_chart() {
        let mut layout = Layout::new();
        // Room for the heading line, not for the bar below it
        layout.y = CONTENT_BOTTOM - 15.0;
        layout.push(Element::Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0, fill: Rgb::BLACK });
        layout.bmi_chart("BMI Category Chart:", 22.9);

        assert_eq!(layout.pages.len(), 2);
        assert!(layout.pages[0].elements.iter().all(|e| e.text().is_none()));
        let second = &layout.pages[1];
        assert!(second.elements.iter().any(|e| e.text() == Some("BMI Category Chart:")));
        assert!(second
            .elements
            .iter()
            .any(|e| matches!(e, Element::Rect { height, .. } if *height == CHART_HEIGHT)));
    }

    #[test]
    fn test_chart_marker_clamps() {
        assert_eq!(chart_marker_x(0.0), MARGIN);
        assert_eq!(chart_marker_x(25.0), MARGIN + CONTENT_WIDTH / 2.0);
        assert_eq!(chart_marker_x(50.0), PAGE_WIDTH - MARGIN);
        assert_eq!(chart_marker_x(63.0), PAGE_WIDTH - MARGIN);
    }

    #[test]
    fn test_chart_bands_cover_chart() {
        let doc = format_report(&bundle(200.0));
        let band_widths: f64 = doc
            .pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(|e| match e {
                Element::Rect { width, height, fill, .. }
                    if *height == CHART_HEIGHT && *fill != Rgb::CHART_BACKGROUND =>
                {
                    Some(*width)
                }
                _ => None,
            })
            .sum();
        assert!((band_widths - CONTENT_WIDTH).abs() < 1e-9);

        let marker = doc
            .pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .find_map(|e| match e {
                Element::Circle { cx, .. } => Some(*cx),
                _ => None,
            })
            .unwrap();
        // 200 kg at 1.75 m is BMI 65.3, pinned to the right edge
        assert_eq!(marker, PAGE_WIDTH - MARGIN);
    }

    #[test]
    fn test_custom_title() {
        let options = ReportOptions {
            title: "Quarterly Check".to_string(),
            ..ReportOptions::default()
        };
        let doc = format_report_with(&bundle(70.0), &options);
        assert_eq!(doc.texts().next(), Some("Quarterly Check"));
    }
}
