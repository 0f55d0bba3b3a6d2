use entity::Employee;
use platform_api::{CollectionModel, LinkBuilder, RepresentationModel, hal::SELF_REL};

use super::model::EmployeeModel;

pub const EMPLOYEES_REL: &str = "employees";
pub const COLLECTION_PATH: &str = "/employees";
pub const ITEM_PATH: &str = "/employees/{id}";

pub type EmployeeResource = RepresentationModel<EmployeeModel>;
pub type EmployeeCollection = CollectionModel<EmployeeResource>;

/// Turns stored employees into linked wire models.
#[derive(Clone, Debug)]
pub struct EmployeeModelAssembler {
    links: LinkBuilder,
}

impl EmployeeModelAssembler {
    pub fn new(links: LinkBuilder) -> Self {
        Self { links }
    }

    pub fn to_model(&self, employee: &Employee) -> EmployeeResource {
        let id = employee.id.to_string();
        RepresentationModel::new(EmployeeModel::from(employee))
            .with_link(self.links.link(SELF_REL, ITEM_PATH, &[("id", id.as_str())]))
            .with_link(self.links.link(EMPLOYEES_REL, COLLECTION_PATH, &[]))
    }

    pub fn to_collection_model(&self, employees: &[Employee]) -> EmployeeCollection {
        let content = employees.iter().map(|e| self.to_model(e)).collect();
        CollectionModel::new(EMPLOYEES_REL, content)
            .with_link(self.links.link(SELF_REL, COLLECTION_PATH, &[]))
    }
}
