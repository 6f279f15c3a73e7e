use std::collections::BTreeMap;

use crate::error::SynthError;
use crate::template::{Output, Resource, Template, TEMPLATE_FORMAT_VERSION};

/// A named template under construction.
///
/// Constructs register resources through [`Stack::add_resource`]; a logical
/// id can only be claimed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    name: String,
    description: Option<String>,
    resources: BTreeMap<String, Resource>,
    outputs: BTreeMap<String, Output>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn add_resource(
        &mut self,
        logical_id: impl Into<String>,
        resource: Resource,
    ) -> Result<(), SynthError> {
        let logical_id = logical_id.into();
        if self.resources.contains_key(&logical_id) {
            return Err(SynthError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id,
            });
        }
        self.resources.insert(logical_id, resource);
        Ok(())
    }

    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        output: Output,
    ) -> Result<(), SynthError> {
        let name = name.into();
        if self.outputs.contains_key(&name) {
            return Err(SynthError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id: name,
            });
        }
        self.outputs.insert(name, output);
        Ok(())
    }

    pub fn contains(&self, logical_id: &str) -> bool {
        self.resources.contains_key(logical_id)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn resource_mut(&mut self, logical_id: &str) -> Result<&mut Resource, SynthError> {
        let stack = &self.name;
        self.resources
            .get_mut(logical_id)
            .ok_or_else(|| SynthError::UnknownResource {
                stack: stack.clone(),
                logical_id: logical_id.to_string(),
            })
    }

    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Resource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, resource)| resource.resource_type == resource_type)
            .map(|(logical_id, resource)| (logical_id.as_str(), resource))
    }

    pub fn outputs(&self) -> &BTreeMap<String, Output> {
        &self.outputs
    }

    pub fn to_template(&self) -> Template {
        Template {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description: self.description.clone(),
            resources: self.resources.clone(),
            outputs: self.outputs.clone(),
        }
    }
}
