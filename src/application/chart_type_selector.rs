// Chart type selector - buttons for the chart kinds an asset offers
use crate::domain::chart::ChartType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTypeOption {
    pub chart_type: ChartType,
    pub label: &'static str,
    pub selected: bool,
}

pub struct ChartTypeSelector;

impl ChartTypeSelector {
    /// One option per offered kind, in fixed display order (bar, line, area,
    /// pie). Duplicates in `available` collapse; an empty slice offers every
    /// kind.
    pub fn options(available: &[ChartType], selected: ChartType) -> Vec<ChartTypeOption> {
        ChartType::ALL
            .into_iter()
            .filter(|kind| Self::offers(available, *kind))
            .map(|kind| ChartTypeOption {
                chart_type: kind,
                label: kind.label(),
                selected: kind == selected,
            })
            .collect()
    }

    pub fn offers(available: &[ChartType], chart_type: ChartType) -> bool {
        available.is_empty() || available.contains(&chart_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_and_dedup() {
        let available = [ChartType::Pie, ChartType::Bar, ChartType::Pie, ChartType::Line];
        let options = ChartTypeSelector::options(&available, ChartType::Pie);

        let kinds: Vec<_> = options.iter().map(|o| o.chart_type).collect();
        assert_eq!(kinds, vec![ChartType::Bar, ChartType::Line, ChartType::Pie]);
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert!(options[2].selected);
        assert_eq!(options[1].label, "Line");
    }

    #[test]
    fn test_empty_offers_everything() {
        let options = ChartTypeSelector::options(&[], ChartType::Area);
        assert_eq!(options.len(), 4);
        assert_eq!(options[2].chart_type, ChartType::Area);
        assert!(options[2].selected);
    }

    #[test]
    fn test_never_offers_outside_set() {
        let options = ChartTypeSelector::options(&[ChartType::Line], ChartType::Bar);
        assert_eq!(options.len(), 1);
        assert!(!options[0].selected);
        assert!(!ChartTypeSelector::offers(&[ChartType::Line], ChartType::Bar));
    }
}
