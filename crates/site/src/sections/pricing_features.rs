//! Pricing page "billing fundamentals" section.

use super::row::{ContentItem, ImagePosition, Row, RowProps};

const STORAGE_ILLUSTRATION: &str = "/images/pages/pricing/storage-illustration.jpg";
const COMPUTE_ILLUSTRATION: &str = "/images/pages/pricing/compute-illustration.jpg";

/// Storage row items.
pub const STORAGE_ITEMS: &[ContentItem] = &[
    ContentItem {
        icon: "/icons/aws/branching.svg",
        title: "Branches = copies of data + schema",
        text: "Database branches in Neon feel like \"database copies\", but they are ready instantly and they don't cost you extra storage.",
    },
    ContentItem {
        icon: "/icons/aws/storage.svg",
        title: "Thousands of branches, same storage cost",
        text: "All branches in a project share the same storage. 100 GB in Neon feels like a lot more\u{2014}you can \"copy\" that dataset hundreds of times for testing, dev...",
    },
];

/// Compute row items.
pub const COMPUTE_ITEMS: &[ContentItem] = &[
    ContentItem {
        icon: "/icons/ai/compatibility.svg",
        title: "You only pay for the compute you use",
        text: "Compute size is measured in <span class=\"font-medium text-white underline decoration-dotted underline-offset-4\" data-tooltip-id=\"cu-icon\" data-tooltip-html=\"1 CU = 1 vCPU, 4 GB RAM\">CUs</span>. Database branches autoscale from 0.25 to 10 CU based on load and down to zero when inactive.",
    },
    ContentItem {
        icon: "/icons/landing/timer.svg",
        title: "\"Compute you use\" = \"compute hours\"",
        text: "\"Compute hours\" is how we measure compute usage. Example: 4 CU compute (4 CPU, 16 GiB RAM) running for 20 hours uses 80 compute hours. All monthly plans include generous usage, with extra compute hours billed separately.",
    },
];

/// The two rows, in display order.
pub const ROWS: [RowProps; 2] = [
    RowProps {
        title: "Storage",
        items: STORAGE_ITEMS,
        image: STORAGE_ILLUSTRATION,
        image_position: ImagePosition::Left,
    },
    RowProps {
        title: "Compute",
        items: COMPUTE_ITEMS,
        image: COMPUTE_ILLUSTRATION,
        image_position: ImagePosition::Right,
    },
];

/// Renders the section markup.
pub fn features_section() -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<section class=\"safe-paddings relative mt-60 xl:mt-48 lg:mt-[124px] md:mt-[88px]\">");
    out.push_str("<div class=\"container-md grid-gap-x grid grid-cols-12\">");

    out.push_str("<div class=\"col-span-10 col-start-2\">");
    out.push_str("<span class=\"gradient-label mx-auto block w-fit\">Details</span>");
    out.push_str("<h2 class=\"mt-4 text-center text-[48px] font-medium leading-none tracking-tight text-white lg:text-4xl sm:text-[36px]\">Neon billing fundamentals</h2>");
    out.push_str("<p class=\"mt-3 text-center text-lg font-light leading-snug sm:text-base\">An architecture with branch-based storage and compute that autoscales</p>");
    out.push_str("</div>");

    out.push_str("<div class=\"col-span-10 col-start-2 mt-[72px] flex flex-col items-center gap-y-20 xl:col-span-full xl:col-start-1 xl:gap-y-[104px] md:gap-y-16\">");
    for props in ROWS {
        Row::new(props).render_into(&mut out);
    }
    out.push_str("</div></div></section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_heading_and_label() {
        let html = features_section();
        assert!(html.starts_with("<section"));
        assert!(html.ends_with("</section>"));
        assert!(html.contains(">Details</span>"));
        assert!(html.contains(">Neon billing fundamentals</h2>"));
    }

    #[test]
    fn test_rows_in_order() {
        let html = features_section();
        let storage = html.find(">Storage</h3>").unwrap();
        let compute = html.find(">Compute</h3>").unwrap();
        assert!(storage < compute);
        assert_eq!(html.matches("<li ").count(), 4);
    }

    #[test]
    fn test_compute_image_on_right() {
        let html = features_section();
        let compute_title = html.find(">Compute</h3>").unwrap();
        let compute_image = html.find(COMPUTE_ILLUSTRATION).unwrap();
        let storage_title = html.find(">Storage</h3>").unwrap();
        let storage_image = html.find(STORAGE_ILLUSTRATION).unwrap();
        assert!(storage_image < storage_title);
        assert!(compute_image > compute_title);
    }

    #[test]
    fn test_titles_escaped_markup_kept() {
        let html = features_section();
        assert!(html.contains(r#">"Compute you use" = "compute hours"</h4>"#));
        assert!(html.contains(r#"data-tooltip-id="cu-icon""#));
    }

    #[test]
    fn test_pure() {
        assert_eq!(features_section(), features_section());
    }
}
