use super::catalog::Catalog;
use super::domain::{ResourceLimits, ResourceTotals, Story, StoryId};
use std::sync::Arc;

/// Stories chosen for the mission, kept within the resource limits at all times.
///
/// Additions are checked against the prospective totals before anything is
/// mutated, so an over-budget state is never observable. Insertion order is
/// retained because it decides the order in which perturbations are drawn.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    catalog: Arc<Catalog>,
    limits: ResourceLimits,
    selected: Vec<StoryId>,
}

impl SelectionSet {
    pub fn new(catalog: Arc<Catalog>, limits: ResourceLimits) -> Self {
        Self {
            catalog,
            limits,
            selected: Vec::new(),
        }
    }

    pub fn add(&mut self, id: &StoryId) -> Result<ResourceTotals, SelectionRejection> {
        let story = self
            .catalog
            .get(id)
            .ok_or_else(|| SelectionRejection::UnknownStory(id.clone()))?;

        if self.contains(id) {
            return Err(SelectionRejection::AlreadySelected(id.clone()));
        }

        let current = self.totals();
        let prospective = current.with_story(story);

        if prospective.ru > self.limits.max_ru {
            return Err(SelectionRejection::ResourceUnitsExceeded {
                story: id.clone(),
                requested: story.ru,
                used: current.ru,
                limit: self.limits.max_ru,
            });
        }

        if prospective.slots > self.limits.max_slots {
            return Err(SelectionRejection::SlotsExceeded {
                story: id.clone(),
                requested: story.slots,
                used: current.slots,
                limit: self.limits.max_slots,
            });
        }

        self.selected.push(id.clone());
        Ok(prospective)
    }

    /// Returns whether the story was selected before the call.
    pub fn remove(&mut self, id: &StoryId) -> bool {
        let before = self.selected.len();
        self.selected.retain(|selected| selected != id);
        self.selected.len() != before
    }

    /// Story-card click: deselect when present, otherwise attempt to add.
    pub fn toggle(&mut self, id: &StoryId) -> Result<Toggle, SelectionRejection> {
        if self.remove(id) {
            Ok(Toggle::Removed)
        } else {
            self.add(id).map(|_| Toggle::Added)
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn totals(&self) -> ResourceTotals {
        self.stories()
            .fold(ResourceTotals::default(), |totals, story| {
                totals.with_story(story)
            })
    }

    pub fn contains(&self, id: &StoryId) -> bool {
        self.selected.contains(id)
    }

    pub fn ids(&self) -> &[StoryId] {
        &self.selected
    }

    /// Selected stories in the order they were added.
    pub fn stories(&self) -> impl Iterator<Item = &Story> + '_ {
        self.selected.iter().filter_map(|id| self.catalog.get(id))
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn limits(&self) -> ResourceLimits {
        self.limits
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Why a story could not be added; the selection is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionRejection {
    #[error("Story {} is not in the catalog", .0.number())]
    UnknownStory(StoryId),
    #[error("Story {} is already selected", .0.number())]
    AlreadySelected(StoryId),
    #[error("Cannot add Story {}: Would exceed RU limit!", .story.number())]
    ResourceUnitsExceeded {
        story: StoryId,
        requested: u32,
        used: u32,
        limit: u32,
    },
    #[error("Cannot add Story {}: Would exceed Slot limit!", .story.number())]
    SlotsExceeded {
        story: StoryId,
        requested: u32,
        used: u32,
        limit: u32,
    },
}

impl SelectionRejection {
    pub fn story(&self) -> &StoryId {
        match self {
            Self::UnknownStory(story)
            | Self::AlreadySelected(story)
            | Self::ResourceUnitsExceeded { story, .. }
            | Self::SlotsExceeded { story, .. } => story,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownStory(_) => "unknown_story",
            Self::AlreadySelected(_) => "already_selected",
            Self::ResourceUnitsExceeded { .. } => "ru_limit",
            Self::SlotsExceeded { .. } => "slot_limit",
        }
    }
}
