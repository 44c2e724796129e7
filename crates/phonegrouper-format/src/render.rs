use std::io::Write;

use phonegrouper_core::{Grouping, GroupingDto, Member};

use crate::Result;

pub fn write_text_report<W, T>(writer: &mut W, grouping: &Grouping<T>) -> Result<()>
where
    W: Write,
    T: Member,
{
    writeln!(writer, "Groups: {}", grouping.groups.len())?;

    for (idx, group) in grouping.groups.iter().enumerate() {
        writeln!(writer)?;
        writeln!(writer, "Group {} ({})", idx + 1, group.key)?;
        for member in &group.members {
            writeln!(writer, "{}", member.display_text())?;
        }
    }

    if let Some(group) = &grouping.unclassifiable {
        writeln!(writer)?;
        writeln!(writer, "Unclassifiable: {}", group.len())?;
        for member in &group.members {
            writeln!(writer, "{}", member.display_text())?;
        }
    }

    if !grouping.rejected.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Rejected: {}", grouping.rejected.len())?;
        for rejected in &grouping.rejected {
            writeln!(
                writer,
                "line {}: {} ({})",
                rejected.item.record_id(),
                rejected.item.display_text(),
                rejected.error
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

pub fn write_json_report<W, T>(writer: &mut W, grouping: &Grouping<T>) -> Result<()>
where
    W: Write,
    T: Member,
{
    let dto = GroupingDto::from_grouping(grouping);
    serde_json::to_writer_pretty(&mut *writer, &dto)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_json_report, write_text_report};
    use phonegrouper_core::{Pipeline, PipelineConfig, Record, UnclassifiedPolicy};

    fn sample(policy: UnclassifiedPolicy) -> phonegrouper_core::Grouping<Record> {
        let pipeline = Pipeline::new(PipelineConfig {
            unclassified: policy,
            ..PipelineConfig::default()
        })
        .expect("pipeline");
        pipeline.group_records(vec![
            Record::new(1, "+1 (555) 123-4567"),
            Record::new(2, "555-123-4567").with_name("Ada"),
            Record::new(3, "555.999.0000"),
            Record::new(4, "abc"),
        ])
    }

    #[test]
    fn text_report_lists_groups_then_unclassifiable() {
        let mut out = Vec::new();
        write_text_report(&mut out, &sample(UnclassifiedPolicy::Group)).expect("render");
        let text = String::from_utf8(out).expect("utf8");
        let expected = "Groups: 2\n\
            \n\
            Group 1 (5551234567)\n\
            +1 (555) 123-4567\n\
            555-123-4567\tAda\n\
            \n\
            Group 2 (5559990000)\n\
            555.999.0000\n\
            \n\
            Unclassifiable: 1\n\
            abc\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn text_report_lists_rejections_with_reasons() {
        let mut out = Vec::new();
        write_text_report(&mut out, &sample(UnclassifiedPolicy::Report)).expect("render");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Rejected: 1\nline 4: abc (invalid number format"));
        assert!(!text.contains("Unclassifiable"));
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let mut out = Vec::new();
        write_json_report(&mut out, &sample(UnclassifiedPolicy::Group)).expect("render");
        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["records"], 4);
        assert_eq!(value["group_count"], 2);
        assert_eq!(value["groups"][0]["key"], "5551234567");
        assert_eq!(value["groups"][0]["members"][1]["id"], 2);
        assert_eq!(value["unclassifiable"][0]["text"], "abc");
    }
}
