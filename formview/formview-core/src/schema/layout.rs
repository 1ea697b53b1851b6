use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    Grid,
    Flex,
    Tabs,
    Steps,
    Sections,
    Groups,
}

/// Arrangement of the schema's fields into containers.
///
/// Each container lists its member fields by name, in render order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Grid column count; `0` renders as one column.
    pub columns: usize,
    pub sections: Vec<Section>,
    pub tabs: Vec<Tab>,
    pub steps: Vec<Step>,
    pub groups: Vec<Group>,
}

impl Layout {
    pub fn new(layout_type: LayoutType) -> Self {
        Self {
            layout_type,
            ..Default::default()
        }
    }

    pub fn grid(columns: usize) -> Self {
        Self {
            layout_type: LayoutType::Grid,
            columns,
            ..Default::default()
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Every `(container kind, container id, field name)` reference in the layout.
    pub fn member_references(&self) -> impl Iterator<Item = (&'static str, &str, &str)> {
        let sections = self
            .sections
            .iter()
            .flat_map(|s| s.fields.iter().map(move |f| ("section", s.id.as_str(), f.as_str())));
        let tabs = self
            .tabs
            .iter()
            .flat_map(|t| t.fields.iter().map(move |f| ("tab", t.id.as_str(), f.as_str())));
        let steps = self
            .steps
            .iter()
            .flat_map(|s| s.fields.iter().map(move |f| ("step", s.id.as_str(), f.as_str())));
        let groups = self
            .groups
            .iter()
            .flat_map(|g| g.fields.iter().map(move |f| ("group", g.id.as_str(), f.as_str())));
        sections.chain(tabs).chain(steps).chain(groups)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub fields: Vec<String>,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// One page of a multi-step form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    pub id: String,
    pub title: String,
    pub fields: Vec<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub description: String,
    pub border: bool,
    pub fields: Vec<String>,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}
