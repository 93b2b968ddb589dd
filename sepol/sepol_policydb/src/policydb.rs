//! The policy database.

use serde::{Deserialize, Serialize};
use std::fmt;

use sepol_core::error::{PolicyError, TranslationError};
use sepol_core::log_event;
use sepol_core::utils::LogLevel;

use crate::consts::type_flavor;
use crate::datum::{
    CatDatum, ClassDatum, CommonDatum, RoleDatum, SensDatum, TypeDatum, UserDatum,
};
use crate::ebitmap::Ebitmap;
use crate::symtab::SymTab;

/// The representation a database was loaded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    /// Compiled kernel policy. Attribute membership lives in the global
    /// `attr_type_map` / `type_attr_map`, permissive types in
    /// `permissive_map`.
    Kernel,
    /// Source (base module) policy. Attribute membership lives in each
    /// attribute datum.
    #[default]
    Base,
}

/// Which value→name table to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameTable {
    /// Security classes.
    Class,
    /// Roles.
    Role,
    /// Types and attributes.
    Type,
    /// Users.
    User,
    /// Sensitivities.
    Sensitivity,
    /// Categories.
    Category,
}

impl NameTable {
    /// Name of the table, for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Role => "role",
            Self::Type => "type",
            Self::User => "user",
            Self::Sensitivity => "sensitivity",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value-indexed policy database.
///
/// Fields are public: this is the raw store that loaders populate. After
/// changing symbol tables, call [`PolicyDb::reindex`] to rebuild the
/// value→name tables and the kernel-form global maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyDb {
    /// Representation of this database.
    pub policy_type: PolicyType,
    /// Whether multi-level security support is active.
    pub mls: bool,

    /// Commons.
    pub p_commons: SymTab<CommonDatum>,
    /// Classes.
    pub p_classes: SymTab<ClassDatum>,
    /// Roles.
    pub p_roles: SymTab<RoleDatum>,
    /// Types, attributes and aliases.
    pub p_types: SymTab<TypeDatum>,
    /// Users.
    pub p_users: SymTab<UserDatum>,
    /// Sensitivities.
    pub p_levels: SymTab<SensDatum>,
    /// Categories.
    pub p_cats: SymTab<CatDatum>,

    /// Class names by value − 1.
    pub p_class_val_to_name: Vec<String>,
    /// Role names by value − 1.
    pub p_role_val_to_name: Vec<String>,
    /// Primary type names by value − 1.
    pub p_type_val_to_name: Vec<String>,
    /// User names by value − 1.
    pub p_user_val_to_name: Vec<String>,
    /// Sensitivity names by value − 1.
    pub p_sens_val_to_name: Vec<String>,
    /// Category names by value − 1.
    pub p_cat_val_to_name: Vec<String>,

    /// For each type value − 1, the types of an attribute (kernel form).
    pub attr_type_map: Vec<Ebitmap>,
    /// For each type value − 1, the attributes of a type (kernel form).
    pub type_attr_map: Vec<Ebitmap>,
    /// Permissive types, indexed by value (kernel form).
    pub permissive_map: Ebitmap,
}

impl PolicyDb {
    /// Create an empty database.
    pub fn new(policy_type: PolicyType, mls: bool) -> Self {
        Self {
            policy_type,
            mls,
            ..Self::default()
        }
    }

    /// Whether attribute membership is held in the global maps.
    pub fn is_kernel(&self) -> bool {
        self.policy_type == PolicyType::Kernel
    }

    /// Resolve a 1-based value to its name.
    pub fn val_to_name(&self, table: NameTable, value: u32) -> Result<&str, TranslationError> {
        let names = match table {
            NameTable::Class => &self.p_class_val_to_name,
            NameTable::Role => &self.p_role_val_to_name,
            NameTable::Type => &self.p_type_val_to_name,
            NameTable::User => &self.p_user_val_to_name,
            NameTable::Sensitivity => &self.p_sens_val_to_name,
            NameTable::Category => &self.p_cat_val_to_name,
        };
        value
            .checked_sub(1)
            .and_then(|index| names.get(index as usize))
            .map(String::as_str)
            .ok_or(TranslationError::UnknownValue {
                table: table.as_str(),
                value,
            })
    }

    /// Resolve a bitmap bit (value − 1) to its name.
    pub fn bit_to_name(&self, table: NameTable, bit: u32) -> Result<&str, TranslationError> {
        self.val_to_name(table, bit + 1)
    }

    /// Resolve a name to its 1-based value.
    pub fn name_to_val(&self, table: NameTable, name: &str) -> Option<u32> {
        match table {
            NameTable::Class => self.p_classes.search(name).map(|d| d.value),
            NameTable::Role => self.p_roles.search(name).map(|d| d.value),
            NameTable::Type => self.p_types.search(name).map(|d| d.value),
            NameTable::User => self.p_users.search(name).map(|d| d.value),
            NameTable::Sensitivity => self.p_levels.search(name).map(|d| d.value),
            NameTable::Category => self.p_cats.search(name).map(|d| d.value),
        }
    }

    /// Rebuild the value→name tables and, for kernel form, the attribute
    /// maps, from the symbol tables.
    ///
    /// Fails if two primary symbols claim the same value or a value is left
    /// without a name.
    pub fn reindex(&mut self) -> Result<(), PolicyError> {
        self.p_class_val_to_name =
            index_names("class", self.p_classes.nprim(), self.p_classes.iter().map(|(k, d)| (k, d.value)))?;
        self.p_role_val_to_name =
            index_names("role", self.p_roles.nprim(), self.p_roles.iter().map(|(k, d)| (k, d.value)))?;
        self.p_type_val_to_name = index_names(
            "type",
            self.p_types.nprim(),
            self.p_types
                .iter()
                .filter(|(_, d)| d.is_primary())
                .map(|(k, d)| (k, d.value)),
        )?;
        self.p_user_val_to_name =
            index_names("user", self.p_users.nprim(), self.p_users.iter().map(|(k, d)| (k, d.value)))?;
        self.p_sens_val_to_name = index_names(
            "sensitivity",
            self.p_levels.nprim(),
            self.p_levels.iter().map(|(k, d)| (k, d.value)),
        )?;
        self.p_cat_val_to_name =
            index_names("category", self.p_cats.nprim(), self.p_cats.iter().map(|(k, d)| (k, d.value)))?;

        if self.is_kernel() {
            self.rebuild_attr_maps();
        } else {
            self.attr_type_map.clear();
            self.type_attr_map.clear();
        }

        log_event!(LogLevel::Debug, "reindexed policy database",
            classes => self.p_classes.len(),
            roles => self.p_roles.len(),
            types => self.p_types.len(),
            users => self.p_users.len(),
        );
        Ok(())
    }

    // Every type maps to itself; attributes additionally map to their
    // members and members back to their attributes.
    fn rebuild_attr_maps(&mut self) {
        let nprim = self.p_types.nprim() as usize;
        let mut attr_type_map = vec![Ebitmap::new(); nprim];
        let mut type_attr_map = vec![Ebitmap::new(); nprim];

        for (_, datum) in self.p_types.iter().filter(|(_, d)| d.is_primary()) {
            let bit = datum.value - 1;
            attr_type_map[bit as usize].set(bit);
            type_attr_map[bit as usize].set(bit);
            if datum.flavor == type_flavor::ATTRIB {
                for member in datum.types.iter() {
                    attr_type_map[bit as usize].set(member);
                    if let Some(map) = type_attr_map.get_mut(member as usize) {
                        map.set(bit);
                    }
                }
            }
        }

        self.attr_type_map = attr_type_map;
        self.type_attr_map = type_attr_map;
    }
}

fn index_names<'a>(
    kind: &'static str,
    nprim: u32,
    entries: impl Iterator<Item = (&'a String, u32)>,
) -> Result<Vec<String>, PolicyError> {
    let mut names: Vec<Option<String>> = vec![None; nprim as usize];
    for (name, value) in entries {
        let slot = value
            .checked_sub(1)
            .and_then(|index| names.get_mut(index as usize))
            .ok_or_else(|| PolicyError::UnknownName {
                kind,
                name: format!("{} (value {})", name, value),
            })?;
        if slot.is_some() {
            return Err(PolicyError::Duplicate {
                kind,
                name: name.clone(),
            });
        }
        *slot = Some(name.clone());
    }
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            name.ok_or_else(|| PolicyError::UnknownName {
                kind,
                name: format!("value {}", index + 1),
            })
        })
        .collect()
}
