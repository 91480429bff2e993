mod common;

use std::sync::Arc;

use common::{init, MemoryStore};
use rstest::rstest;
use stash_filter::{
    apply_filters, encode_for_backup, mapping, restore_compiler, Document, EntityKind,
    MappingTable, RestoreRemapper,
};

fn remapper() -> RestoreRemapper {
    let store = MemoryStore::default()
        .with_drop(42, 4, "xyz987654")
        .with_drop(43, 4, "uvw")
        .with_trade(90, "qrs123");
    RestoreRemapper::new(Arc::new(store))
}

fn table() -> std::collections::HashMap<(EntityKind, u64), u64> {
    mapping! {
        EntityKind::Drop => { 5 => 42, 6 => 43, 8 => 404 },
        EntityKind::Trade => { 9 => 90, 10 => 999 },
    }
}

#[rstest]
#[case("[drop:5:abchash:i:buy]", "[drop:42:xyz:i:buy]")]
#[case("[drop:6:abc]", "[drop:43:uvw]")]
#[case("[drop:7:abc]", "[drop:0:WHOOPS]")]
#[case("[drop:7:abc:t:Open]", "[drop:0:WHOOPS:t:Open]")]
#[case("[drop:8:abc]", "[drop:0:WHOOPS]")]
#[case("[trade:9:F00D]", "[trade:90:qrs]")]
#[case("[trade:9:f00d:junk]", "[trade:90:qrs]")]
#[case("[trade:5:f00d]", "[trade:0:WHOOPS]")]
#[case("[trade:10:f00d]", "[trade:0:WHOOPS]")]
fn remaps_ids(#[case] input: &str, #[case] expected: &str) {
    init();
    assert_eq!(remapper().remap(input, &table()), expected);
}

#[test]
fn surrounding_content_is_verbatim() {
    let content = "<p>Find [drop:5:abc:i:Take] and [trade:9:f00d].</p> [drop:x:abc] [drop:5:abc";
    assert_eq!(
        remapper().remap(content, &table()),
        "<p>Find [drop:42:xyz:i:Take] and [trade:90:qrs].</p> [drop:x:abc] [drop:5:abc"
    );
}

#[test]
fn repeated_ids_share_one_lookup() {
    struct Counting {
        inner: std::collections::HashMap<(EntityKind, u64), u64>,
        hits: std::cell::Cell<usize>,
    }

    impl MappingTable for Counting {
        fn get_mapping(&self, kind: EntityKind, old_id: u64) -> Option<u64> {
            self.hits.set(self.hits.get() + 1);
            self.inner.get_mapping(kind, old_id)
        }
    }

    let counting = Counting {
        inner: table(),
        hits: std::cell::Cell::new(0),
    };
    let out = remapper().remap("[trade:9:aaa][trade:9:bbb][trade:9:ccc][drop:5:abc]", &counting);
    assert_eq!(out, "[trade:90:qrs][trade:90:qrs][trade:90:qrs][drop:42:xyz]");
    assert_eq!(counting.hits.get(), 2);
}

#[test]
fn two_phase_backup_and_decode() {
    let content = "a [drop:5:abc:i:Go] b [trade:9:f00d] c [drop:7:abc]";
    let encoded = encode_for_backup(content);
    assert_eq!(
        encoded,
        "a [drop:$@FILTERSTASHDROPSNIPPET*5@$:i:Go] b [trade:$@FILTERSTASHTRADESNIPPET*9@$] c [drop:$@FILTERSTASHDROPSNIPPET*7@$]"
    );

    let decoded = remapper().decode_placeholders(&encoded, &table());
    assert_eq!(decoded, "a [drop:42:xyz:i:Go] b [trade:90:qrs] c [drop:0:WHOOPS]");
    assert_eq!(decoded, remapper().remap(content, &table()));
}

#[test]
fn stray_placeholder_markers_survive_decode() {
    let content = "cost $@FILTERSTASHDROPSNIPPET*abc@$ and $@ alone";
    assert_eq!(remapper().decode_placeholders(content, &table()), content);
}

#[test]
fn empty_mapping_flags_everything() {
    let out = remapper().remap("[drop:5:abc][trade:9:f00d]", &mapping! {});
    assert_eq!(out, "[drop:0:WHOOPS][trade:0:WHOOPS]");
}

#[test]
fn restore_compiler_rewrites_documents() {
    let filters = vec![restore_compiler(remapper(), Arc::new(table()))];
    let doc = Document::parse("page.html", "[drop:6:abc:t:Here]");
    assert_eq!(apply_filters(doc, &filters).unwrap().content, "[drop:43:uvw:t:Here]");
}
