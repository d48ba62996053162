use crate::chart::ScaleSet;
use crate::color::to_hex;
use crate::data::model::Employee;
use crate::scale::Scale;
use crate::scene::{Circle, Node};

// ---------------------------------------------------------------------------
// Scatter marks
// ---------------------------------------------------------------------------

/// One circle per employee, positioned in graph-area coordinates and
/// coloured by department. Records with malformed numbers keep their `NaN`
/// coordinates.
pub fn draw_plot(employees: &[Employee], scales: &ScaleSet, radius: f64) -> Vec<Node> {
    employees
        .iter()
        .map(|emp| {
            Node::Circle(Circle {
                cx: scales.seniority.apply(emp.seniority()),
                cy: scales.salary.apply(emp.salary()),
                r: radius,
                class: Some(emp.area.clone()),
                fill: Some(to_hex(scales.area.color_for(&emp.area))),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Layout;
    use crate::config::ChartConfig;
    use crate::data::model::{CellValue, EmployeeDataset};

    fn dataset() -> EmployeeDataset {
        EmployeeDataset::from_employees(vec![
            Employee::new(CellValue::Integer(20), CellValue::Text("50000".into()), "Production"),
            Employee::new(CellValue::Integer(40), CellValue::Integer(160000), "Executive"),
            Employee::new(CellValue::Integer(10), CellValue::Integer(50000), "Janitorial"),
        ])
    }

    fn circles(nodes: &[Node]) -> Vec<&Circle> {
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Circle(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn marks_sit_at_scaled_positions() {
        let ds = dataset();
        let config = ChartConfig::default();
        let scales = ScaleSet::build(&ds, &Layout::from_config(&config), &config);
        let nodes = draw_plot(&ds.employees, &scales, 3.0);
        let marks = circles(&nodes);

        assert_eq!(marks.len(), ds.len());
        for (mark, emp) in marks.iter().zip(&ds.employees) {
            assert_eq!(mark.cx, scales.seniority.apply(emp.seniority()));
            assert_eq!(mark.cy, scales.salary.apply(emp.salary()));
            assert_eq!(mark.r, 3.0);
            assert_eq!(mark.class.as_deref(), Some(emp.area.as_str()));
        }
        assert_eq!(marks[0].cx, 350.0);
    }

    #[test]
    fn string_and_numeric_salaries_share_a_row() {
        let ds = dataset();
        let config = ChartConfig::default();
        let scales = ScaleSet::build(&ds, &Layout::from_config(&config), &config);
        let nodes = draw_plot(&ds.employees, &scales, 3.0);
        let marks = circles(&nodes);
        assert_eq!(marks[0].cy, marks[2].cy);
    }

    #[test]
    fn fill_follows_department() {
        let ds = dataset();
        let config = ChartConfig::default();
        let scales = ScaleSet::build(&ds, &Layout::from_config(&config), &config);
        let nodes = draw_plot(&ds.employees, &scales, 3.0);
        let marks = circles(&nodes);
        assert_eq!(marks[0].fill.as_deref(), Some("#1f77b4"));
        assert_eq!(marks[1].fill.as_deref(), Some("#ff7f0e"));
    }

    #[test]
    fn malformed_rows_render_at_nan() {
        let ds = EmployeeDataset::from_employees(vec![
            Employee::new(CellValue::Integer(5), CellValue::Integer(30000), "Production"),
            Employee::new(CellValue::Text("?".into()), CellValue::Null, "Production"),
        ]);
        let config = ChartConfig::default();
        let scales = ScaleSet::build(&ds, &Layout::from_config(&config), &config);
        let nodes = draw_plot(&ds.employees, &scales, 3.0);
        let marks = circles(&nodes);
        assert!(marks[1].cx.is_nan());
        assert!(marks[1].cy.is_nan());
    }
}
