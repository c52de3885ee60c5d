// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for barcode label printing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The record keys a label template can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    Barcode,
    Make,
    Model,
    Submodel,
    YearRange,
    Oem,
    Description,
    Category,
    PartNumber,
    Stock,
    Location,
}

impl LabelField {
    /// Every known key, in the order the full template consumes them.
    pub const ALL: [LabelField; 11] = [
        Self::Barcode,
        Self::Make,
        Self::Model,
        Self::Submodel,
        Self::YearRange,
        Self::Oem,
        Self::Description,
        Self::Category,
        Self::PartNumber,
        Self::Stock,
        Self::Location,
    ];

    /// Key name as sent by the app.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Barcode => "barcode",
            Self::Make => "make",
            Self::Model => "model",
            Self::Submodel => "submodel",
            Self::YearRange => "yearRange",
            Self::Oem => "oem",
            Self::Description => "description",
            Self::Category => "category",
            Self::PartNumber => "partNumber",
            Self::Stock => "stock",
            Self::Location => "location",
        }
    }
}

/// Key-value payload of a print request.
///
/// Any key may be absent. Lookups of absent keys yield the empty string so
/// that rendering never fails on partial data. Non-string JSON values are
/// dropped on construction and therefore also read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Map<String, Value>",
    into = "BTreeMap<String, String>"
)]
pub struct LabelRecord {
    values: BTreeMap<String, String>,
}

impl LabelRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object, keeping only string values.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let values = object
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_owned())))
            .collect();
        Self { values }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: LabelField, value: impl Into<String>) -> Self {
        self.values.insert(field.key().to_owned(), value.into());
        self
    }

    /// Value for `field`, or `""` when absent.
    pub fn get(&self, field: LabelField) -> &str {
        self.values
            .get(field.key())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for LabelRecord {
    fn from(object: Map<String, Value>) -> Self {
        Self::from_json_object(&object)
    }
}

impl From<LabelRecord> for BTreeMap<String, String> {
    fn from(record: LabelRecord) -> Self {
        record.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Raw template index as received from the caller.
///
/// Kept as the full integer so that out-of-range values survive until the
/// renderer decides what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSelector(pub i64);

impl TemplateSelector {
    pub fn new(index: i64) -> Self {
        Self(index)
    }

    pub fn index(&self) -> i64 {
        self.0
    }

    /// The named template this selector maps to, if any.
    pub fn kind(&self) -> Option<TemplateKind> {
        TemplateKind::from_index(self.0)
    }
}

impl std::fmt::Display for TemplateSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five label layouts, from barcode-only to full detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Barcode and code only.
    Simple,
    /// Adds vehicle information.
    Basic,
    /// Adds OEM code and description.
    Standard,
    /// Adds category and part number.
    Detailed,
    /// Adds stock and location.
    Full,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        Self::Simple,
        Self::Basic,
        Self::Standard,
        Self::Detailed,
        Self::Full,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Simple),
            1 => Some(Self::Basic),
            2 => Some(Self::Standard),
            3 => Some(Self::Detailed),
            4 => Some(Self::Full),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Simple => 0,
            Self::Basic => 1,
            Self::Standard => 2,
            Self::Detailed => 3,
            Self::Full => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Detailed => "detailed",
            Self::Full => "full",
        }
    }
}

/// Rectangle on the label canvas. Origin is bottom-left, as on the native
/// print view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What a field carries beyond its text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    #[default]
    Text,
    /// The text is an inventory barcode; surfaces that can draw bars do.
    Barcode,
}

/// One positioned text block on the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedField {
    pub text: String,
    pub frame: Frame,
    #[serde(default)]
    pub role: FieldRole,
}

impl RenderedField {
    pub fn vertical_offset(&self) -> f64 {
        self.frame.y
    }

    /// Individual lines of the block (composers join lines with `\n`).
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Paper size and margins of the label stock, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PageGeometry {
    /// Uniform margins on all four sides.
    pub fn with_margin(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin_left: margin,
            margin_right: margin,
            margin_top: margin,
            margin_bottom: margin,
        }
    }
}

impl Default for PageGeometry {
    /// 100×50 label with 5 on every side. Must match the physical stock.
    fn default() -> Self {
        Self::with_margin(100.0, 50.0, 5.0)
    }
}

/// Everything a print surface needs to put one label on paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCanvas {
    pub title: String,
    pub geometry: PageGeometry,
    pub fields: Vec<RenderedField>,
}

impl LabelCanvas {
    pub fn texts(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }
}

/// What a print surface reports back after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The user confirmed and the job was handed to the printer.
    Completed,
    /// The user dismissed the print dialog.
    Cancelled,
    /// The surface could not print; the detail is for logs only.
    Failed(String),
}

impl PrintOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Unique identifier for a label job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of a label job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Created, nothing submitted yet.
    Pending,
    /// Handed to the surface; the print dialog may be open.
    Printing,
    /// The surface reported success.
    Completed,
    /// The surface reported cancellation or failure.
    Failed,
}

/// Bookkeeping for a single print request. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelJob {
    pub id: JobId,
    pub selector: TemplateSelector,
    pub field_count: usize,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LabelJob {
    pub fn new(selector: TemplateSelector, field_count: usize) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            selector,
            field_count,
            status: JobStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `status`, bumping the update timestamp.
    pub fn transition(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
