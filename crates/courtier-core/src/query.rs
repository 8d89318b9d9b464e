//! Listing query builders
//!
//! Translate filter and sort intent into the exact query strings the listing
//! endpoints expect. The two client populations use different parameter
//! names for the same concepts, so the builder owns that mapping instead of
//! scattering it over call sites.

use crate::models::ClientKind;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort key for client listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSort {
    #[default]
    Score,
    Ref,
}

impl ClientSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Ref => "ref",
        }
    }
}

impl std::str::FromStr for ClientSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "ref" => Ok(Self::Ref),
            _ => Err(format!("Unknown client sort field: {}", s)),
        }
    }
}

/// Sort key for alert listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertSort {
    #[default]
    Expiry,
    Ref,
}

impl AlertSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expiry => "expiry",
            Self::Ref => "ref",
        }
    }
}

impl std::str::FromStr for AlertSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expiry" => Ok(Self::Expiry),
            "ref" => Ok(Self::Ref),
            _ => Err(format!("Unknown alert sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Desc,
    Asc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Asc => "asc",
        }
    }
}

impl std::str::FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desc" => Ok(Self::Desc),
            "asc" => Ok(Self::Asc),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

/// Builder for a client listing request
///
/// Always emits `limit`, `offset`, `sort_by`, `sort_dir` and
/// `include_total=false` so pagination cost stays flat. Blank filter values
/// are dropped rather than sent as empty parameters.
#[derive(Debug, Clone)]
pub struct ClientQuery {
    kind: ClientKind,
    limit: u32,
    offset: u32,
    sort_by: ClientSort,
    sort_dir: SortDir,
    segment: Option<String>,
    risk: Option<String>,
}

impl ClientQuery {
    pub fn new(kind: ClientKind) -> Self {
        Self {
            kind,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort_by: ClientSort::default(),
            sort_dir: SortDir::default(),
            segment: None,
            risk: None,
        }
    }

    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn sort_by(mut self, sort: ClientSort) -> Self {
        self.sort_by = sort;
        self
    }

    pub fn sort_dir(mut self, dir: SortDir) -> Self {
        self.sort_dir = dir;
        self
    }

    pub fn segment(mut self, segment: Option<&str>) -> Self {
        self.segment = non_blank(segment);
        self
    }

    pub fn risk(mut self, risk: Option<&str>) -> Self {
        self.risk = non_blank(risk);
        self
    }

    /// Query parameters in the population's dialect
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("sort_dir", self.sort_dir.as_str().to_string()),
            ("include_total", "false".to_string()),
        ];
        let (segment_key, risk_key) = match self.kind {
            ClientKind::Physical => ("client_segment", "risk_profile"),
            ClientKind::Moral => ("segment", "business_risk"),
        };
        if let Some(ref segment) = self.segment {
            params.push((segment_key, segment.clone()));
        }
        if let Some(ref risk) = self.risk {
            params.push((risk_key, risk.clone()));
        }
        params
    }
}

/// Builder for an alert listing request
#[derive(Debug, Clone)]
pub struct AlertQuery {
    limit: u32,
    offset: u32,
    sort_by: AlertSort,
    sort_dir: SortDir,
    alert_type: Option<String>,
    product: Option<String>,
}

impl AlertQuery {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            sort_by: AlertSort::default(),
            sort_dir: SortDir::default(),
            alert_type: None,
            product: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn sort_by(mut self, sort: AlertSort) -> Self {
        self.sort_by = sort;
        self
    }

    pub fn sort_dir(mut self, dir: SortDir) -> Self {
        self.sort_dir = dir;
        self
    }

    pub fn alert_type(mut self, alert_type: Option<&str>) -> Self {
        self.alert_type = non_blank(alert_type);
        self
    }

    pub fn product(mut self, product: Option<&str>) -> Self {
        self.product = non_blank(product);
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("sort_dir", self.sort_dir.as_str().to_string()),
            ("include_total", "false".to_string()),
        ];
        if let Some(ref alert_type) = self.alert_type {
            params.push(("alert_type", alert_type.clone()));
        }
        if let Some(ref product) = self.product {
            params.push(("product", product.clone()));
        }
        params
    }
}

impl Default for AlertQuery {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn defaults_always_carry_pagination_and_sort() {
        let params = ClientQuery::new(ClientKind::Physical).to_params();
        assert_eq!(get(&params, "limit"), Some("10"));
        assert_eq!(get(&params, "offset"), Some("0"));
        assert_eq!(get(&params, "sort_by"), Some("score"));
        assert_eq!(get(&params, "sort_dir"), Some("desc"));
        assert_eq!(get(&params, "include_total"), Some("false"));
    }

    #[test]
    fn physical_and_moral_use_different_filter_names() {
        let physical = ClientQuery::new(ClientKind::Physical)
            .segment(Some("Premium"))
            .risk(Some("Low"))
            .to_params();
        assert_eq!(get(&physical, "client_segment"), Some("Premium"));
        assert_eq!(get(&physical, "risk_profile"), Some("Low"));
        assert_eq!(get(&physical, "segment"), None);

        let moral = ClientQuery::new(ClientKind::Moral)
            .segment(Some("PME"))
            .risk(Some("High"))
            .to_params();
        assert_eq!(get(&moral, "segment"), Some("PME"));
        assert_eq!(get(&moral, "business_risk"), Some("High"));
        assert_eq!(get(&moral, "client_segment"), None);
    }

    #[test]
    fn blank_filters_are_omitted() {
        let params = ClientQuery::new(ClientKind::Physical)
            .segment(Some("  "))
            .risk(Some(""))
            .to_params();
        assert_eq!(get(&params, "client_segment"), None);
        assert_eq!(get(&params, "risk_profile"), None);
    }

    #[test]
    fn alert_query_carries_type_and_product_filters() {
        let params = AlertQuery::new()
            .limit(10)
            .offset(20)
            .sort_by(AlertSort::Ref)
            .sort_dir(SortDir::Asc)
            .alert_type(Some("expiry"))
            .product(Some("Auto"))
            .to_params();
        assert_eq!(get(&params, "limit"), Some("10"));
        assert_eq!(get(&params, "offset"), Some("20"));
        assert_eq!(get(&params, "sort_by"), Some("ref"));
        assert_eq!(get(&params, "sort_dir"), Some("asc"));
        assert_eq!(get(&params, "alert_type"), Some("expiry"));
        assert_eq!(get(&params, "product"), Some("Auto"));
    }
}
