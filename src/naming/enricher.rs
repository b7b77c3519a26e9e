use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::group::Group;
use crate::naming::errors::EnrichmentError;
use crate::naming::prompt::{build_naming_prompt, parse_team_names};

/// Возможность "придумать имена группам".
pub trait NameEnricher {
    fn enrich(
        &self,
        groups: &[Group],
    ) -> impl Future<Output = Result<HashMap<String, String>, EnrichmentError>>;
}

/// Транспорт к генеративному текстовому сервису: промпт -> сырой ответ.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, EnrichmentError>>;
}

/// Имена через генеративный сервис: строим промпт, разбираем JSON-ответ.
pub struct GenerativeNameEnricher<T> {
    generator: T,
}

impl<T: TextGenerator> GenerativeNameEnricher<T> {
    pub fn new(generator: T) -> Self {
        Self { generator }
    }
}

impl<T: TextGenerator> NameEnricher for GenerativeNameEnricher<T> {
    async fn enrich(&self, groups: &[Group]) -> Result<HashMap<String, String>, EnrichmentError> {
        let prompt = build_naming_prompt(groups)?;
        let raw = self.generator.generate(&prompt).await?;
        let names = parse_team_names(&raw)?;
        if names.is_empty() {
            return Err(EnrichmentError::Empty);
        }
        Ok(names)
    }
}

/// Фиксированная карта имён (например, из JSON-файла).
#[derive(Clone, Debug, Default)]
pub struct StaticNameEnricher {
    names: HashMap<String, String>,
}

impl StaticNameEnricher {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// JSON-объект `{"group-0": "Имя", ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, EnrichmentError> {
        let names: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))?;
        Ok(Self::new(names))
    }

    pub fn from_file(path: &Path) -> Result<Self, EnrichmentError> {
        let text = fs::read_to_string(path)
            .map_err(|e| EnrichmentError::Unavailable(e.to_string()))?;
        Self::from_json_str(&text)
    }
}

impl NameEnricher for StaticNameEnricher {
    async fn enrich(&self, _groups: &[Group]) -> Result<HashMap<String, String>, EnrichmentError> {
        if self.names.is_empty() {
            return Err(EnrichmentError::Empty);
        }
        Ok(self.names.clone())
    }
}

/// Применить карту имён: только к совпавшим id и только непустые имена.
/// Возвращает число переименованных групп.
pub fn apply_names(groups: &mut [Group], names: &HashMap<String, String>) -> usize {
    let mut renamed = 0;
    for group in groups.iter_mut() {
        if let Some(name) = names.get(&group.id) {
            let name = name.trim();
            if !name.is_empty() {
                group.name = name.to_string();
                renamed += 1;
            }
        }
    }
    renamed
}

/// Запросить имена и применить их.
///
/// Ошибка логируется как предупреждение и возвращается вызывающему;
/// группы при этом не меняются ни по составу, ни по именам.
pub async fn enrich_groups<E>(groups: &mut [Group], enricher: &E) -> Result<usize, EnrichmentError>
where
    E: NameEnricher,
{
    match enricher.enrich(groups).await {
        Ok(names) => {
            let renamed = apply_names(groups, &names);
            info!(renamed, total = groups.len(), "group names enriched");
            Ok(renamed)
        }
        Err(err) => {
            warn!(error = %err, "group naming failed, keeping default names");
            Err(err)
        }
    }
}
