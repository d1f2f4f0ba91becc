use super::document::{
    FILE_TYPE_APPDATA, NOTIFY_LED, NOTIFY_NEW, SERVICE_STATUS_OPEN, TaskSheet,
};

/// Title-id literal of the console runtime, and the substitute the emulator
/// build expects. The emulator sheet is the console sheet with exactly this
/// substring swapped.
pub const CONSOLE_TITLE_LITERAL: &str = "10162c00";
pub const EMULATOR_TITLE_LITERAL: &str = "10162b00";

/// Serialize to the exact wire shape: UTF-8, no XML declaration, no
/// inter-tag whitespace, no attributes, repeated entries each tagged `File`.
pub fn serialize(sheet: &TaskSheet) -> Vec<u8> {
    let mut out = String::with_capacity(256 + sheet.files.len() * 256);
    out.push_str("<TaskSheet>");
    elem(&mut out, "TitleId", sheet.title_id);
    elem(&mut out, "TaskId", sheet.task_id.token());
    elem(&mut out, "ServiceStatus", SERVICE_STATUS_OPEN);
    out.push_str("<Files>");
    for file in &sheet.files {
        out.push_str("<File>");
        elem(&mut out, "Filename", &file.filename);
        elem(&mut out, "DataId", &file.data_id.to_string());
        elem(&mut out, "Type", FILE_TYPE_APPDATA);
        elem(&mut out, "Url", &file.url);
        elem(&mut out, "Size", &file.size.to_string());
        out.push_str("<Notify>");
        elem(&mut out, "New", NOTIFY_NEW);
        elem(&mut out, "LED", NOTIFY_LED);
        out.push_str("</Notify>");
        out.push_str("</File>");
    }
    out.push_str("</Files>");
    out.push_str("</TaskSheet>");
    out.into_bytes()
}

/// Derive the emulator variant from serialized sheet bytes. Pure text
/// substitution so both variants stay byte-identical everywhere else.
pub fn derive_emulator_sheet(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .replace(CONSOLE_TITLE_LITERAL, EMULATOR_TITLE_LITERAL)
        .into_bytes()
}

fn elem(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    escape_into(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ContentDescriptor, Region, TaskKind};
    use crate::sheet::document::{AllocatedItem, TaskSheet};

    fn single_file_sheet() -> TaskSheet {
        let items = [AllocatedItem {
            descriptor: ContentDescriptor {
                file_name: "a.bin",
                source_path: "a.bin",
            },
            data_id: 7,
            cipher: vec![0u8; 42],
        }];
        TaskSheet::build(Region::Eur, TaskKind::SchData, &items)
    }

    #[test]
    fn single_file_sheet_is_byte_exact() {
        let xml = serialize(&single_file_sheet());
        let expected = "<TaskSheet>\
<TitleId>0005000010176a00</TitleId>\
<TaskId>schdata</TaskId>\
<ServiceStatus>open</ServiceStatus>\
<Files><File>\
<Filename>a.bin</Filename>\
<DataId>7</DataId>\
<Type>AppData</Type>\
<Url>https://rexisp.github.io/p01/content/zvGSM4kOrXpkKnpT/a.bin</Url>\
<Size>42</Size>\
<Notify><New>app</New><LED>false</LED></Notify>\
</File></Files>\
</TaskSheet>";
        assert_eq!(xml, expected.as_bytes());
    }

    #[test]
    fn no_declaration_and_no_inter_tag_whitespace() {
        let xml = serialize(&single_file_sheet());
        let text = String::from_utf8(xml).unwrap();
        assert!(text.starts_with("<TaskSheet>"));
        assert!(!text.contains("<?xml"));
        assert!(!text.contains("> <"));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn serialization_is_deterministic() {
        let sheet = single_file_sheet();
        assert_eq!(serialize(&sheet), serialize(&sheet));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut sheet = single_file_sheet();
        sheet.files[0].filename = "a<&>.bin".to_string();
        let text = String::from_utf8(serialize(&sheet)).unwrap();
        assert!(text.contains("<Filename>a&lt;&amp;&gt;.bin</Filename>"));
    }

    #[test]
    fn emulator_variant_differs_only_in_title_literal() {
        let items = [AllocatedItem {
            descriptor: ContentDescriptor {
                file_name: "VSSetting.byaml",
                source_path: "VSSetting.byaml",
            },
            data_id: 1,
            cipher: vec![0u8; 9],
        }];
        let jpn = serialize(&TaskSheet::build(Region::Jpn, TaskKind::SchData, &items));
        let emu = derive_emulator_sheet(&jpn);
        assert_ne!(jpn, emu);
        assert_eq!(jpn.len(), emu.len());
        let restored = String::from_utf8(emu).unwrap().replace(
            EMULATOR_TITLE_LITERAL,
            CONSOLE_TITLE_LITERAL,
        );
        assert_eq!(restored.as_bytes(), &jpn[..]);

        // Non-JPN sheets carry neither literal, so the variant is identical.
        let eur = serialize(&TaskSheet::build(Region::Eur, TaskKind::SchData, &items));
        assert_eq!(derive_emulator_sheet(&eur), eur);
    }
}
