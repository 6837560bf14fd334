mod dataset;
mod parser;

use super::domain::{Story, StoryId};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Immutable list of selectable stories, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    stories: Vec<Story>,
    index: HashMap<StoryId, usize>,
}

impl Catalog {
    /// The 30-story classroom dataset.
    pub fn standard() -> Self {
        let stories = dataset::standard_stories();
        let index = stories
            .iter()
            .enumerate()
            .map(|(position, story)| (story.id.clone(), position))
            .collect();
        Self { stories, index }
    }

    pub fn new(stories: Vec<Story>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(stories.len());
        for (position, story) in stories.iter().enumerate() {
            if index.insert(story.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateStory(story.id.clone()));
            }
        }
        Ok(Self { stories, index })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let stories = parser::parse_stories(reader)?;
        Self::new(stories)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.index.get(id).map(|position| &self.stories[*position])
    }

    pub fn contains(&self, id: &StoryId) -> bool {
        self.index.contains_key(id)
    }

    /// Stories in source order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingId { line: usize },
    UnknownTag { story: StoryId, tag: String },
    DuplicateStory(StoryId),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read story catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid story catalog CSV: {}", err),
            CatalogError::MissingId { line } => {
                write!(f, "story on line {} has no id", line)
            }
            CatalogError::UnknownTag { story, tag } => {
                write!(f, "story {} uses unknown tag '{}'", story, tag)
            }
            CatalogError::DuplicateStory(id) => {
                write!(f, "story id {} appears more than once", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::MissingId { .. }
            | CatalogError::UnknownTag { .. }
            | CatalogError::DuplicateStory(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
