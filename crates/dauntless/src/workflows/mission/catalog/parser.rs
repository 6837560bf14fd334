use super::super::domain::{Story, StoryId, StoryTag};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_stories<R: Read>(reader: R) -> Result<Vec<Story>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut stories = Vec::new();

    for (index, record) in csv_reader.deserialize::<StoryRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        let line = index + 2;
        stories.push(row.into_story(line)?);
    }

    Ok(stories)
}

#[derive(Debug, Deserialize)]
struct StoryRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    stakeholder: String,
    #[serde(default)]
    user_story: String,
    ru: u32,
    slots: u32,
    #[serde(default)]
    tags: String,
}

impl StoryRow {
    fn into_story(self, line: usize) -> Result<Story, CatalogError> {
        let id = self.id.ok_or(CatalogError::MissingId { line })?;
        let id = StoryId::new(id);
        let tags = split_tags(&self.tags)
            .map(|raw| {
                StoryTag::parse(raw).ok_or_else(|| CatalogError::UnknownTag {
                    story: id.clone(),
                    tag: raw.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Story {
            id,
            title: self.title,
            stakeholder: self.stakeholder,
            user_story: self.user_story,
            ru: self.ru,
            slots: self.slots,
            tags,
        })
    }
}

fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c| c == ';' || c == '|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
