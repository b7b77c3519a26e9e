use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::group::Group;
use crate::naming::errors::EnrichmentError;

/// Описание одной группы для запроса к генеративному сервису.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupPromptEntry {
    pub id: String,
    pub members: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamNamesResponse {
    #[serde(default)]
    team_names: Vec<TeamNameItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamNameItem {
    group_id: String,
    name: String,
}

/// Собрать текст запроса: инструкция + JSON со списком групп и имён участников.
pub fn build_naming_prompt(groups: &[Group]) -> Result<String, EnrichmentError> {
    let entries: Vec<GroupPromptEntry> = groups
        .iter()
        .map(|g| GroupPromptEntry {
            id: g.id.clone(),
            members: g.members.iter().map(|m| m.name.clone()).collect(),
        })
        .collect();

    let payload = serde_json::to_string_pretty(&entries)
        .map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))?;

    Ok(format!(
        "I have a list of teams and their members.\n\
         Please generate a creative, fun, and professional team name for each group.\n\
         The names should be suitable for a corporate teambuilding event.\n\
         Answer with JSON of the form {{\"teamNames\": [{{\"groupId\": \"...\", \"name\": \"...\"}}]}}.\n\n\
         Here are the groups:\n{}",
        payload
    ))
}

/// Разобрать ответ вида `{"teamNames": [{"groupId": .., "name": ..}]}`.
///
/// Пустой текст -> пустая карта. Пустые имена пропускаются.
pub fn parse_team_names(text: &str) -> Result<HashMap<String, String>, EnrichmentError> {
    if text.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let parsed: TeamNamesResponse = serde_json::from_str(text)
        .map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))?;

    Ok(parsed
        .team_names
        .into_iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| (item.group_id, item.name.trim().to_string()))
        .collect())
}
