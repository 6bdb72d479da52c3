//! Paginated results.

use serde_json::Value;

use crate::descriptor::{Entity, EntityDescriptor, FieldDescriptor, FieldType, Shape};
use crate::error::MappingError;
use crate::mapper::{self, ObjectNode};
use crate::selection::Selection;

/// Page size used when callers do not choose one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size the remote service honours.
pub const MAX_PER_PAGE: u32 = 50;

/// Page number and page size for a paginated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

impl Pagination {
    /// Create a pagination; `page` is clamped to at least 1 and `per_page`
    /// to `1..=MAX_PER_PAGE`.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// The first page with the given size.
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// The following page with the same size.
    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.per_page)
    }

    /// Wrap `data` in a `Page(page:, perPage:)` selection that also
    /// requests the page metadata.
    pub fn wrap(&self, data: Selection) -> Selection {
        Selection::new("Page")
            .argument("page", self.page)
            .argument("perPage", self.per_page)
            .child(Selection::entity::<PageInfo>("pageInfo"))
            .child(data)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// Page metadata reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub total: Option<i32>,
    pub per_page: Option<i32>,
    pub current_page: Option<i32>,
    pub last_page: Option<i32>,
    pub has_next_page: Option<bool>,
}

static PAGE_INFO: EntityDescriptor = EntityDescriptor {
    type_name: "PageInfo",
    fields: &[
        FieldDescriptor {
            remote_name: "total",
            local_name: "total",
            type_name: "Option<i32>",
            nullable: true,
            selectable: true,
            shape: <Option<i32> as FieldType>::shape,
        },
        FieldDescriptor {
            remote_name: "perPage",
            local_name: "per_page",
            type_name: "Option<i32>",
            nullable: true,
            selectable: true,
            shape: <Option<i32> as FieldType>::shape,
        },
        FieldDescriptor {
            remote_name: "currentPage",
            local_name: "current_page",
            type_name: "Option<i32>",
            nullable: true,
            selectable: true,
            shape: <Option<i32> as FieldType>::shape,
        },
        FieldDescriptor {
            remote_name: "lastPage",
            local_name: "last_page",
            type_name: "Option<i32>",
            nullable: true,
            selectable: true,
            shape: <Option<i32> as FieldType>::shape,
        },
        FieldDescriptor {
            remote_name: "hasNextPage",
            local_name: "has_next_page",
            type_name: "Option<bool>",
            nullable: true,
            selectable: true,
            shape: <Option<bool> as FieldType>::shape,
        },
    ],
};

impl Entity for PageInfo {
    fn descriptor() -> &'static EntityDescriptor {
        &PAGE_INFO
    }

    fn from_node(node: &ObjectNode<'_>) -> Result<Self, MappingError> {
        Ok(Self {
            total: node.field("total")?,
            per_page: node.field("per_page")?,
            current_page: node.field("current_page")?,
            last_page: node.field("last_page")?,
            has_next_page: node.field("has_next_page")?,
        })
    }
}

impl FieldType for PageInfo {
    fn shape() -> Shape {
        Shape::Object(<Self as Entity>::descriptor)
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        mapper::map(value)
    }
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub page_info: PageInfo,
    pub data: Vec<T>,
}

impl<T: FieldType> Page<T> {
    /// Map a `Page` object whose items live under `data_field`.
    pub fn from_value(page: &Value, data_field: &str) -> Result<Self, MappingError> {
        let page_info = match page.get("pageInfo") {
            None | Some(Value::Null) => PageInfo::default(),
            Some(value) => {
                PageInfo::from_value(value).map_err(|err| err.within("Page", "pageInfo"))?
            }
        };
        let data = match page.get(data_field) {
            None | Some(Value::Null) => return Err(MappingError::missing("Page", data_field)),
            Some(value) => {
                Vec::<T>::from_value(value).map_err(|err| err.within("Page", data_field))?
            }
        };
        Ok(Self { page_info, data })
    }
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn has_next_page(&self) -> bool {
        self.page_info.has_next_page.unwrap_or(false)
    }

    /// Pagination for the following page, if the service reports one.
    pub fn next_pagination(&self) -> Option<Pagination> {
        if !self.has_next_page() {
            return None;
        }
        let current = self.page_info.current_page.unwrap_or(1).max(1) as u32;
        let per_page = self
            .page_info
            .per_page
            .map_or(DEFAULT_PER_PAGE, |n| n.max(1) as u32);
        Some(Pagination::new(current, per_page).next())
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
