use crate::data::types::Listing;

/// A client command line, parsed once per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRequest {
    List,
    Search { city: String, max_price: i64 },
    Quit,
    Invalid { reason: String },
}

impl ClientRequest {
    /// Parses a raw command line. The verb is case-insensitive; anything that
    /// is not `LIST`, `SEARCH` or `QUIT` (or a `SEARCH` with bad fields)
    /// becomes `Invalid` carrying the exact error text the client will see.
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return ClientRequest::Invalid {
                reason: "invalid command (use LIST, SEARCH, or QUIT)".to_string(),
            };
        };

        match head.to_uppercase().as_str() {
            "LIST" => ClientRequest::List,
            "QUIT" => ClientRequest::Quit,
            "SEARCH" => match parse_search_params(line) {
                Ok((city, max_price)) => ClientRequest::Search { city, max_price },
                Err(reason) => ClientRequest::Invalid { reason },
            },
            _ => ClientRequest::Invalid {
                reason: "invalid command (use LIST, SEARCH, or QUIT)".to_string(),
            },
        }
    }
}

/// Extracts `city` and `max_price` from a `SEARCH` command line.
///
/// Field keys are case-insensitive and may appear in any order; values are
/// taken verbatim. The returned `Err` text goes straight into the `ERROR`
/// reply.
pub fn parse_search_params(line: &str) -> Result<(String, i64), String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let mut city: Option<&str> = None;
    let mut max_price: Option<&str> = None;
    for token in parts.iter().skip(1) {
        let Some((key, value)) = token.split_once('=') else {
            return Err("invalid SEARCH syntax (expected key=value fields)".to_string());
        };
        match key.trim().to_lowercase().as_str() {
            "city" => city = Some(value.trim()),
            "max_price" => max_price = Some(value.trim()),
            _ => {}
        }
    }

    let (Some(city), Some(max_price)) = (city, max_price) else {
        return Err("SEARCH requires city and max_price".to_string());
    };

    let max_price: i64 = max_price
        .parse()
        .map_err(|_| "max_price must be an integer".to_string())?;

    Ok((city.to_string(), max_price))
}

/// Reply to a client command, with its canonical wire serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResponse {
    Ok(Vec<Listing>),
    Error(String),
}

impl GatewayResponse {
    /// Serializes the reply in wire form: `OK RESULT <n>` followed by one
    /// `key=value;...` line per listing, or `ERROR <message>`, either way
    /// terminated by `END`.
    pub fn to_wire(&self) -> String {
        match self {
            GatewayResponse::Ok(listings) => {
                let mut out = format!("OK RESULT {}\n", listings.len());
                for listing in listings {
                    out.push_str(&format!(
                        "id={};city={};address={};price={};bedrooms={}\n",
                        listing.id, listing.city, listing.address, listing.price, listing.bedrooms
                    ));
                }
                out.push_str("END\n");
                out
            }
            GatewayResponse::Error(message) => format!("ERROR {}\nEND\n", message),
        }
    }

    /// Only `Ok` replies are cache-eligible.
    pub fn is_ok(&self) -> bool {
        matches!(self, GatewayResponse::Ok(_))
    }
}
