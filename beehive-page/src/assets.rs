//! Dictionary-driven attributes on fixed elements (logos, links, media).

use crate::Document;
use beehive_i18n::Dictionary;

/// Which dictionary strings are accepted for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    NonEmpty,
    AnyString,
}

/// `(element id, attribute, dictionary path, accepted values)`.
type Target = (&'static str, &'static str, &'static str, Accept);

const BRAND: [Target; 4] = [
    ("siteLogo", "src", "brand.logoSrc", Accept::NonEmpty),
    ("footerLogo", "src", "brand.logoSrc", Accept::NonEmpty),
    ("loaderLogo", "src", "brand.logoSrc", Accept::NonEmpty),
    ("siteFavicon", "href", "brand.faviconSrc", Accept::NonEmpty),
];

const CONTACT: [Target; 2] = [
    ("contactEmail", "href", "contact.details.emailHref", Accept::AnyString),
    ("contactPhone", "href", "contact.details.phoneHref", Accept::AnyString),
];

const MAP: [Target; 1] = [("mapFrame", "src", "contact.mapEmbedUrl", Accept::NonEmpty)];

const SOCIAL: [Target; 3] = [
    ("socialLinkedIn", "href", "footer.social.linkedinUrl", Accept::AnyString),
    ("socialFacebook", "href", "footer.social.facebookUrl", Accept::AnyString),
    ("socialInstagram", "href", "footer.social.instagramUrl", Accept::AnyString),
];

fn apply(doc: &dyn Document, dictionary: &Dictionary, targets: &[Target]) -> usize {
    let mut updated = 0;
    for (id, attribute, path, accept) in targets {
        let value = match accept {
            Accept::NonEmpty => dictionary.lookup_non_empty_str(path),
            Accept::AnyString => dictionary.lookup_str(path),
        };
        if let (Some(node), Some(value)) = (doc.element_by_id(id), value) {
            doc.set_attribute(node, attribute, value);
            updated += 1;
        }
    }
    updated
}

/// Logo images and favicon. Returns the number of attributes written.
pub fn apply_brand_assets(doc: &dyn Document, dictionary: &Dictionary) -> usize {
    apply(doc, dictionary, &BRAND)
}

/// `mailto:` and `tel:` links of the contact section.
pub fn apply_contact_hrefs(doc: &dyn Document, dictionary: &Dictionary) -> usize {
    apply(doc, dictionary, &CONTACT)
}

pub fn apply_map(doc: &dyn Document, dictionary: &Dictionary) -> usize {
    apply(doc, dictionary, &MAP)
}

pub fn apply_social_links(doc: &dyn Document, dictionary: &Dictionary) -> usize {
    apply(doc, dictionary, &SOCIAL)
}

/// About video source; left alone when it already matches so playback is
/// not restarted.
pub fn apply_about_video(doc: &dyn Document, dictionary: &Dictionary) -> usize {
    let Some(node) = doc.element_by_id("aboutVideo") else {
        return 0;
    };
    let Some(src) = dictionary.lookup_non_empty_str("about.videoSrc") else {
        return 0;
    };
    if doc.attribute(node, "src").as_deref() == Some(src) {
        return 0;
    }
    doc.set_attribute(node, "src", src);
    1
}
