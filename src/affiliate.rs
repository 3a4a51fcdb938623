//! Amazon search links carrying an affiliate tag.

use url::Url;

use crate::errors::LinkError;

pub const AMAZON_SEARCH_URL: &str = "https://www.amazon.com/s";

/// A search link derived from a recognized keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateLink {
    pub keyword: String,
    pub url: String,
}

/// Build an Amazon search URL for `keyword`, attributed to `affiliate_tag`
///
/// Both values are query-string encoded, so spaces become `+`:
///
/// ```rust
/// use affiliate_bot::affiliate::build_affiliate_link;
///
/// let link = build_affiliate_link("wireless mouse", "tag123").unwrap();
/// assert_eq!(link.url, "https://www.amazon.com/s?k=wireless+mouse&tag=tag123");
/// ```
pub fn build_affiliate_link(keyword: &str, affiliate_tag: &str) -> Result<AffiliateLink, LinkError> {
    let keyword = keyword.trim();
    let affiliate_tag = affiliate_tag.trim();

    if keyword.is_empty() {
        return Err(LinkError::EmptyKeyword);
    }
    if affiliate_tag.is_empty() {
        return Err(LinkError::EmptyTag);
    }

    let url = Url::parse_with_params(AMAZON_SEARCH_URL, &[("k", keyword), ("tag", affiliate_tag)])?;

    Ok(AffiliateLink {
        keyword: keyword.to_string(),
        url: url.to_string(),
    })
}
