use crate::api::PokedexApi;
use crate::errors::{PokedexError, PokedexResult};
use schema::{BaseStats, LocalizedNames, NewPokemon, PokemonRecord, PokemonType, TypeTag};
use std::cell::RefCell;
use std::collections::HashSet;

/// A builder for creating test records with common defaults.
///
/// # Example
/// ```
/// let record = TestRecordBuilder::new(25, "Pikachu")
///     .with_types(&[PokemonType::Electric])
///     .with_french("Pikachu")
///     .build();
/// ```
pub struct TestRecordBuilder {
    id: u32,
    names: LocalizedNames,
    types: Vec<TypeTag>,
    base: BaseStats,
}

impl TestRecordBuilder {
    /// Creates a new builder for a Normal-type record.
    pub fn new(id: u32, english: &str) -> Self {
        Self {
            id,
            names: LocalizedNames::english(english),
            types: vec![TypeTag::Known(PokemonType::Normal)],
            base: BaseStats::default(),
        }
    }

    pub fn with_types(mut self, types: &[PokemonType]) -> Self {
        self.types = types.iter().copied().map(TypeTag::from).collect();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.types = tags.iter().map(|raw| TypeTag::parse(raw)).collect();
        self
    }

    pub fn with_french(mut self, name: &str) -> Self {
        self.names.french = Some(name.to_string());
        self
    }

    pub fn with_japanese(mut self, name: &str) -> Self {
        self.names.japanese = Some(name.to_string());
        self
    }

    pub fn with_chinese(mut self, name: &str) -> Self {
        self.names.chinese = Some(name.to_string());
        self
    }

    pub fn with_stats(mut self, stats: [u8; 6]) -> Self {
        let [hp, attack, defense, sp_attack, sp_defense, speed] = stats;
        self.base = BaseStats {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        };
        self
    }

    pub fn build(self) -> PokemonRecord {
        PokemonRecord {
            id: self.id,
            name: self.names,
            types: self.types,
            base: self.base,
            image: format!("https://img.example/{:03}.png", self.id),
        }
    }
}

/// In-memory stand-in for the REST API with request logging and failure
/// injection.
pub struct FakeApi {
    records: RefCell<Vec<PokemonRecord>>,
    page_size: usize,
    requested_pages: RefCell<Vec<u32>>,
    refused_pages: RefCell<HashSet<u32>>,
    next_error: RefCell<Option<PokedexError>>,
}

impl FakeApi {
    pub fn new(records: Vec<PokemonRecord>) -> Self {
        Self::with_page_size(records, 20)
    }

    pub fn with_page_size(records: Vec<PokemonRecord>, page_size: usize) -> Self {
        Self {
            records: RefCell::new(records),
            page_size,
            requested_pages: RefCell::new(Vec::new()),
            refused_pages: RefCell::new(HashSet::new()),
            next_error: RefCell::new(None),
        }
    }

    /// Answer the given page with a 500.
    pub fn refuse_page(&self, page: u32) {
        self.refused_pages.borrow_mut().insert(page);
    }

    /// Fail the next call of any kind with this error.
    pub fn fail_next(&self, error: PokedexError) {
        *self.next_error.borrow_mut() = Some(error);
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested_pages.borrow().clone()
    }

    pub fn records(&self) -> Vec<PokemonRecord> {
        self.records.borrow().clone()
    }

    fn take_error(&self) -> PokedexResult<()> {
        match self.next_error.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found(id: u32) -> PokedexError {
        PokedexError::Status {
            status: 404,
            message: format!("Pokemon {} not found", id),
        }
    }
}

impl PokedexApi for FakeApi {
    async fn list_page(&self, page: u32) -> PokedexResult<schema::PokemonPage> {
        self.requested_pages.borrow_mut().push(page);
        self.take_error()?;
        if self.refused_pages.borrow().contains(&page) {
            return Err(PokedexError::Status {
                status: 500,
                message: "page unavailable".to_string(),
            });
        }
        let records = self.records.borrow();
        let total_pages = records.len().div_ceil(self.page_size) as u32;
        let start = (page.saturating_sub(1) as usize) * self.page_size;
        let data = records
            .iter()
            .skip(start)
            .take(self.page_size)
            .cloned()
            .collect();
        Ok(schema::PokemonPage { data, total_pages })
    }

    async fn search(&self, query: &str) -> PokedexResult<Vec<PokemonRecord>> {
        self.take_error()?;
        let needle = query.to_lowercase();
        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|r| r.name.all().any(|n| n.to_lowercase().contains(&needle)))
            .cloned()
            .collect())
    }

    async fn get(&self, id: u32) -> PokedexResult<PokemonRecord> {
        self.take_error()?;
        self.records
            .borrow()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, new: &NewPokemon) -> PokedexResult<PokemonRecord> {
        self.take_error()?;
        let mut records = self.records.borrow_mut();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = PokemonRecord::from_new(id, new.clone());
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &PokemonRecord) -> PokedexResult<PokemonRecord> {
        self.take_error()?;
        let mut records = self.records.borrow_mut();
        let slot = records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| Self::not_found(record.id))?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: u32) -> PokedexResult<()> {
        self.take_error()?;
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
